use std::fmt;

use http::header::AUTHORIZATION;

use crate::client::auth::BearerAuth;
use crate::client::error::ConfigError;
use crate::client::oauth2::OAuth2Params;
use crate::client::response::LogPolicy;

use super::connection::ConnectionBuilder;

/// A pipeline stage applied to a connection under construction.
///
/// Stages are pure functions of the state they captured at chain-assembly
/// time; applying a stage twice to fresh builders yields the same result.
/// Implement this trait to insert custom stages around the built-in three via
/// [`HandlerChain::insert_before`](super::HandlerChain::insert_before) and
/// [`HandlerChain::insert_after`](super::HandlerChain::insert_after).
pub trait Stage: fmt::Debug {
    /// Applies this stage's configuration to the connection.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError`] when the captured state cannot be turned
    /// into connection configuration.
    fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError>;
}

/// First built-in stage: request encoding and auth injection.
///
/// Enables JSON encoding of request bodies and, when the credential provider
/// held a token at assembly time, inserts exactly one `Authorization` header.
/// No credentials or no token means no header; an unauthenticated client is a
/// valid configuration, not an error.
#[derive(Debug, Clone, Default)]
pub struct RequestStage {
    auth: Option<BearerAuth>,
}

impl RequestStage {
    pub(crate) fn new(credentials: Option<&OAuth2Params>) -> Self {
        Self {
            auth: credentials.and_then(OAuth2Params::bearer),
        }
    }
}

impl Stage for RequestStage {
    fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError> {
        connection.encode_json_requests();
        if let Some(auth) = &self.auth {
            connection.insert_header(AUTHORIZATION, auth.header_value()?);
        }
        Ok(())
    }
}

/// Second built-in stage: response logging and decoding.
///
/// Attaches a logging policy when a preference was present at assembly time
/// and enables JSON decoding for responses selected by the content-type
/// filter. Assumes the request stage has already run.
#[derive(Debug, Clone, Default)]
pub struct ResponseStage {
    logging: Option<LogPolicy>,
}

impl ResponseStage {
    pub(crate) fn new(preference: Option<&str>) -> Self {
        Self {
            logging: preference.map(LogPolicy::from_preference),
        }
    }
}

impl Stage for ResponseStage {
    fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError> {
        if let Some(policy) = self.logging {
            connection.log_responses(policy);
        }
        connection.decode_json_responses();
        Ok(())
    }
}

/// Terminal built-in stage: transport selection.
///
/// Selects the default blocking adapter for sending requests and receiving
/// responses. Always present, always last; a connection cannot be completed
/// without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportStage;

impl Stage for TransportStage {
    fn apply(&self, connection: &mut ConnectionBuilder) -> Result<(), ConfigError> {
        connection.use_default_transport()
    }
}
