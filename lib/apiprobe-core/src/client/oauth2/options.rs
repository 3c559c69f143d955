//! Authorization-server description for the token exchange.

use std::time::Duration;

use url::Url;

use super::error::AuthError;

/// Default token-endpoint path on the authorization server.
const DEFAULT_TOKEN_PATH: &str = "/oauth/token";

/// Describes the authorization server a token is fetched from.
///
/// An explicit configuration struct with named setters: build it, then pass it
/// to [`OAuth2Params::fetch_from`](super::OAuth2Params::fetch_from).
///
/// # Example
///
/// ```rust
/// use apiprobe_core::ClientOptions;
///
/// # fn example() -> Result<(), apiprobe_core::AuthError> {
/// let options = ClientOptions::new("https://auth.example.com")?
///     .with_token_path("/oauth2/token")
///     .with_tls_verification(false); // self-signed deployment
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    site: Url,
    token_path: Option<String>,
    verify_tls: bool,
    timeout: Option<Duration>,
}

impl ClientOptions {
    /// Creates options for the authorization server at `site`.
    ///
    /// `site` must be an absolute URL.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::InvalidAuthServer`] when `site` does not parse.
    pub fn new(site: impl AsRef<str>) -> Result<Self, AuthError> {
        let site = Url::parse(site.as_ref()).map_err(|error| AuthError::InvalidAuthServer {
            url: site.as_ref().to_string(),
            reason: error.to_string(),
        })?;
        Ok(Self {
            site,
            token_path: None,
            verify_tls: true,
            timeout: None,
        })
    }

    /// Sets the token-endpoint path, absolute or relative to `site`.
    ///
    /// Defaults to `/oauth/token` when not set. An absolute URL replaces the
    /// site entirely.
    #[must_use]
    pub fn with_token_path(mut self, token_path: impl Into<String>) -> Self {
        self.token_path = Some(token_path.into());
        self
    }

    /// Enables or disables TLS certificate verification.
    ///
    /// Verification is on by default; disable it for self-signed deployments.
    #[must_use]
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Sets a timeout for the token-exchange round trip.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the authorization-server base address.
    pub fn site(&self) -> &Url {
        &self.site
    }

    /// Resolves the token endpoint from the site and token path.
    pub(crate) fn token_url(&self) -> Result<Url, AuthError> {
        let token_path = self.token_path.as_deref().unwrap_or(DEFAULT_TOKEN_PATH);
        self.site
            .join(token_path)
            .map_err(|error| AuthError::InvalidTokenEndpoint {
                url: token_path.to_string(),
                reason: error.to_string(),
            })
    }

    /// Builds the blocking HTTP client used for the exchange.
    ///
    /// Redirects are disabled; the token endpoint must answer directly.
    pub(crate) fn http_client(&self) -> Result<oauth2::reqwest::blocking::Client, AuthError> {
        let mut builder = oauth2::reqwest::blocking::ClientBuilder::new()
            .redirect(oauth2::reqwest::redirect::Policy::none());
        if !self.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|error| AuthError::ConfigurationError {
                reason: error.to_string(),
            })
    }
}
