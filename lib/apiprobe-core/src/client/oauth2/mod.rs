//! OAuth2 credential provisioning for the client pipeline.
//!
//! This module supplies the bearer token the request stage injects into
//! outgoing requests. It supports the client-credentials grant (machine
//! credentials, no end user) through [`OAuth2Params::fetch_from`], with the
//! token-exchange wire protocol delegated to the `oauth2` crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use apiprobe_core::{ClientFactory, ClientOptions, OAuth2Params};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::new("https://auth.example.com")?;
//! let mut credentials = OAuth2Params::new();
//! credentials.fetch_from("client-id", "client-secret", &options)?;
//!
//! let mut factory = ClientFactory::new().with_credentials(credentials);
//! let client = factory.client_for_host("https://api.example.com", None)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod params;
mod provider;

pub use self::error::AuthError;
pub use self::options::ClientOptions;
pub use self::params::OAuth2Params;
