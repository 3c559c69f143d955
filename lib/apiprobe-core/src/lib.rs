//! # apiprobe-core
//!
//! HTTP client construction for API testing.
//!
//! This crate builds the clients an API-testing run sends its requests
//! through. Every client is produced by applying an ordered
//! [`HandlerChain`] of three built-in stages to a new connection:
//!
//! 1. [`RequestStage`] — JSON-encodes request bodies and injects the
//!    `Authorization` header when a credential provider holds a token.
//! 2. [`ResponseStage`] — attaches response logging per the logging
//!    preference and decodes JSON responses selected by content-type.
//! 3. [`TransportStage`] — selects the default blocking transport; always
//!    last.
//!
//! Tokens come from an [`OAuth2Params`] provider performing a blocking
//! client-credentials exchange. Everything is synchronous: fetching a token
//! and building a client both block the calling thread, with no internal
//! retries or locking.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use apiprobe_core::{ClientFactory, ClientOptions, OAuth2Params};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Configure credentials, then fetch.
//! let options = ClientOptions::new("https://auth.example.com")?;
//! let mut credentials = OAuth2Params::new();
//! credentials.fetch_from("client-id", "client-secret", &options)?;
//!
//! // Build a client; the chain snapshots the token at build time.
//! let mut factory = ClientFactory::from_env().with_credentials(credentials);
//! let client = factory.client_for_host("https://api.example.com", None)?;
//!
//! let users: serde_json::Value = client.get("/users")?.json()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom stages
//!
//! Additional [`Stage`]s can be inserted before or after the built-in
//! sequence without disturbing its order:
//!
//! ```rust,no_run
//! use apiprobe_core::{ClientFactory, ConnectionBuilder, ConfigError, Stage};
//!
//! #[derive(Debug)]
//! struct TracingHeader;
//!
//! impl Stage for TracingHeader {
//!     fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError> {
//!         connection.insert_header(
//!             http::header::HeaderName::from_static("x-request-source"),
//!             http::header::HeaderValue::from_static("apiprobe"),
//!         );
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ClientFactory::new();
//! let mut chain = factory.handler_chain();
//! chain.insert_before(TracingHeader);
//! let client = factory.client_with_chain("https://api.example.com", &chain)?;
//! # Ok(())
//! # }
//! ```

mod client;

pub use self::client::{
    ApiResponse, AuthError, ClientError, ClientFactory, ClientOptions, ConfigError,
    ConnectionBuilder, HandlerChain, HttpClient, LOG_ENV_VAR, LogPolicy, OAuth2Params,
    RequestStage, ResponseBody, ResponseStage, SecureString, Stage, TransportStage,
};
