//! Credential-provisioning error types.

use std::fmt;

/// Errors that can occur while fetching an OAuth2 token.
///
/// Raised synchronously from `fetch_from`; never retried internally. A failed
/// fetch leaves the provider exactly as if the fetch had never happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The authorization-server base address is not a valid absolute URL.
    InvalidAuthServer {
        /// The invalid address that was provided.
        url: String,
        /// Description of why the address is invalid.
        reason: String,
    },

    /// The token endpoint could not be derived from the server address and
    /// token path.
    InvalidTokenEndpoint {
        /// The token path that was rejected.
        url: String,
        /// Description of why the endpoint is invalid.
        reason: String,
    },

    /// The authorization server could not be reached.
    NetworkError {
        /// Description of the network failure.
        reason: String,
    },

    /// The authorization server answered with a non-success response.
    ServerRejected {
        /// The error the server reported.
        reason: String,
    },

    /// The token response was malformed or did not contain a usable token.
    InvalidTokenResponse {
        /// Description of what was missing or malformed.
        reason: String,
    },

    /// The token exchange failed for a reason outside the cases above.
    TokenAcquisitionFailed {
        /// Description of the failure.
        reason: String,
    },

    /// The transport used for the exchange could not be configured.
    ConfigurationError {
        /// Description of the configuration issue.
        reason: String,
    },
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAuthServer { url, reason } => {
                write!(formatter, "Invalid authorization server '{url}': {reason}")
            }
            Self::InvalidTokenEndpoint { url, reason } => {
                write!(formatter, "Invalid token endpoint '{url}': {reason}")
            }
            Self::NetworkError { reason } => {
                write!(formatter, "Network error during token exchange: {reason}")
            }
            Self::ServerRejected { reason } => {
                write!(formatter, "Authorization server rejected the request: {reason}")
            }
            Self::InvalidTokenResponse { reason } => {
                write!(formatter, "Invalid token response: {reason}")
            }
            Self::TokenAcquisitionFailed { reason } => {
                write!(formatter, "Token acquisition failed: {reason}")
            }
            Self::ConfigurationError { reason } => {
                write!(formatter, "Credential configuration error: {reason}")
            }
        }
    }
}
