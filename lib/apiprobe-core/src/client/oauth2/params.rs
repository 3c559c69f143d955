//! OAuth2 credential state.

use std::fmt;

use crate::client::auth::{BearerAuth, SecureString};
use crate::client::error::ConfigError;

/// Default token type for freshly constructed parameters.
const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// OAuth2 credential provider: token-type configuration plus the token
/// fetched from the authorization server.
///
/// Configure, then fetch:
///
/// ```rust,no_run
/// use apiprobe_core::{ClientOptions, OAuth2Params};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ClientOptions::new("https://auth.example.com")?;
/// let mut credentials = OAuth2Params::new();
/// credentials.fetch_from("client-id", "client-secret", &options)?;
/// assert!(credentials.token().is_some());
/// # Ok(())
/// # }
/// ```
///
/// The handler chain reads this state by reference at assembly time; a token
/// fetched (or replaced) later is only seen by later builds.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuth2Params {
    pub(crate) token: Option<SecureString>,
    pub(crate) token_type: String,
}

impl OAuth2Params {
    /// Creates parameters with no token and the `bearer` token type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token, absent until a successful fetch.
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(SecureString::as_str)
    }

    /// Returns the configured token type.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Injects an externally-acquired token.
    ///
    /// Useful when a token is provisioned out of band (environment, vault)
    /// instead of through [`fetch_from`](Self::fetch_from).
    pub fn set_token(&mut self, token: impl Into<SecureString>) {
        self.token = Some(token.into());
    }

    /// Replaces the token type, before or after a fetch.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::InvalidTokenType`] when `token_type` is
    /// empty; the previous value is kept.
    pub fn set_token_type(&mut self, token_type: impl Into<String>) -> Result<(), ConfigError> {
        let token_type = token_type.into();
        if token_type.is_empty() {
            return Err(ConfigError::InvalidTokenType { token_type });
        }
        self.token_type = token_type;
        Ok(())
    }

    /// Builder-style variant of [`set_token_type`](Self::set_token_type).
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Result<Self, ConfigError> {
        self.set_token_type(token_type)?;
        Ok(self)
    }

    /// Snapshots the authorization material for a request stage, if a token
    /// is held.
    pub(crate) fn bearer(&self) -> Option<BearerAuth> {
        self.token
            .as_ref()
            .map(|token| BearerAuth::new(self.token_type.clone(), token.clone()))
    }
}

impl Default for OAuth2Params {
    fn default() -> Self {
        Self {
            token: None,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }
}

impl fmt::Debug for OAuth2Params {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OAuth2Params")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .finish()
    }
}
