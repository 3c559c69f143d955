use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::client::HttpClient;
use crate::client::error::ConfigError;
use crate::client::response::LogPolicy;

/// The connection under construction that pipeline stages act on.
///
/// A builder is created per `client_for_host` call, mutated by each stage in
/// chain order, and finally connected into an [`HttpClient`]. Custom stages
/// receive it through [`Stage::apply`](super::Stage::apply) and may add
/// default headers or adjust the encoding flags; the built-in transport stage
/// must have run before the connection can be completed.
#[derive(Debug)]
pub struct ConnectionBuilder {
    base_url: Url,
    headers: HeaderMap,
    json_requests: bool,
    json_responses: bool,
    logging: Option<LogPolicy>,
    transport: Option<reqwest::blocking::Client>,
}

impl ConnectionBuilder {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: HeaderMap::new(),
            json_requests: false,
            json_responses: false,
            logging: None,
            transport: None,
        }
    }

    /// Returns the host this connection is bound to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default headers accumulated so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Inserts a default header sent with every request, replacing any
    /// previous value for the same name.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Enables JSON encoding of outgoing request bodies.
    pub fn encode_json_requests(&mut self) {
        self.json_requests = true;
    }

    /// Returns `true` when request bodies will be JSON-encoded.
    pub fn encodes_json_requests(&self) -> bool {
        self.json_requests
    }

    /// Enables JSON decoding of responses with a matching content-type.
    pub fn decode_json_responses(&mut self) {
        self.json_responses = true;
    }

    /// Returns `true` when matching responses will be JSON-decoded.
    pub fn decodes_json_responses(&self) -> bool {
        self.json_responses
    }

    /// Attaches a response-logging policy.
    pub fn log_responses(&mut self, policy: LogPolicy) {
        self.logging = Some(policy);
    }

    /// Returns the attached logging policy, if any.
    pub fn logging(&self) -> Option<LogPolicy> {
        self.logging
    }

    /// Selects the default blocking transport adapter.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::Transport`] when the adapter cannot be
    /// initialized.
    pub fn use_default_transport(&mut self) -> Result<(), ConfigError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|source| ConfigError::Transport { source })?;
        self.transport = Some(client);
        Ok(())
    }

    /// Returns `true` once a transport adapter has been selected.
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Completes the connection into a usable client.
    pub(crate) fn connect(self) -> Result<HttpClient, ConfigError> {
        let Self {
            base_url,
            headers,
            json_requests,
            json_responses,
            logging,
            transport,
        } = self;
        let transport = transport.ok_or(ConfigError::TransportNotSelected)?;
        Ok(HttpClient::from_parts(
            transport,
            base_url,
            headers,
            json_requests,
            json_responses,
            logging,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ConnectionBuilder {
        let base_url = Url::parse("http://example.com").expect("valid URL");
        ConnectionBuilder::new(base_url)
    }

    #[test]
    fn test_fresh_builder_has_nothing_enabled() {
        let connection = builder();
        assert!(connection.headers().is_empty());
        assert!(!connection.encodes_json_requests());
        assert!(!connection.decodes_json_responses());
        assert!(connection.logging().is_none());
        assert!(!connection.has_transport());
    }

    #[test]
    fn test_connect_requires_a_transport() {
        let connection = builder();
        let result = connection.connect();
        assert!(matches!(result, Err(ConfigError::TransportNotSelected)));
    }

    #[test]
    fn test_connect_with_default_transport() {
        let mut connection = builder();
        connection.use_default_transport().expect("transport builds");
        let client = connection.connect().expect("client builds");
        assert_eq!(client.base_url().as_str(), "http://example.com/");
    }

    #[test]
    fn test_insert_header_replaces_previous_value() {
        use http::header::AUTHORIZATION;

        let mut connection = builder();
        connection.insert_header(AUTHORIZATION, HeaderValue::from_static("bearer one"));
        connection.insert_header(AUTHORIZATION, HeaderValue::from_static("bearer two"));

        let values: Vec<_> = connection.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec![HeaderValue::from_static("bearer two")]);
    }
}
