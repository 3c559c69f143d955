use std::fmt;

use http::HeaderValue;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::ConfigError;

/// Wrapper for sensitive string data that zeroes its memory on drop.
///
/// Used for client secrets and fetched access tokens so that credentials do
/// not linger in memory and never leak through `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SecureString` and returns the inner `String`.
    ///
    /// The caller becomes responsible for the secure handling of the
    /// returned value.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.0)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", Self::mask_sensitive(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl SecureString {
    /// Masks sensitive data for display/logging purposes.
    fn mask_sensitive(value: &str) -> String {
        if value.len() <= 8 {
            "***".to_string()
        } else {
            format!("{}...{}", &value[..4], &value[value.len() - 4..])
        }
    }
}

/// Authorization header material captured from a credential provider at
/// chain-assembly time.
///
/// The scheme is the provider's configured token type, used verbatim
/// (HTTP authentication schemes are case-insensitive).
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct BearerAuth {
    scheme: String,
    token: SecureString,
}

impl BearerAuth {
    pub(crate) fn new(scheme: impl Into<String>, token: impl Into<SecureString>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    /// Formats the `Authorization` header value as `<scheme> <token>`.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, ConfigError> {
        let raw = format!("{} {}", self.scheme, self.token.as_str());
        let mut value =
            HeaderValue::from_str(&raw).map_err(|error| ConfigError::InvalidAuthorization {
                reason: error.to_string(),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BearerAuth")
            .field("scheme", &self.scheme)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
