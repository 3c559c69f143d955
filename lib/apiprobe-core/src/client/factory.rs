use url::Url;

use super::HttpClient;
use super::chain::{ConnectionBuilder, HandlerChain};
use super::error::ConfigError;
use super::oauth2::OAuth2Params;

/// Environment variable read by [`ClientFactory::from_env`] to seed the
/// default logging preference.
pub const LOG_ENV_VAR: &str = "APIPROBE_LOG_HTTP";

/// Builds clients bound to a host, wiring the handler pipeline from the
/// current credential and logging configuration.
///
/// A factory can build any number of clients; each build assembles a fresh
/// [`HandlerChain`] from the state the factory holds at that moment, so
/// fetching or replacing a token between builds affects later builds only.
///
/// # Logging resolution
///
/// The `logging` argument of [`client_for_host`](Self::client_for_host) wins
/// when present and becomes the remembered preference for subsequent builds.
/// When absent, the remembered preference applies; it starts out as the
/// configured default ([`from_env`](Self::from_env) reads [`LOG_ENV_VAR`]
/// once, at construction) or as no logging at all.
///
/// # Example
///
/// ```rust,no_run
/// use apiprobe_core::ClientFactory;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut factory = ClientFactory::from_env();
/// let client = factory.client_for_host("https://api.example.com", None)?;
/// let response = client.get("/users")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientFactory {
    credentials: Option<OAuth2Params>,
    logging: Option<String>,
}

impl ClientFactory {
    /// Creates a factory with no credentials and no logging preference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory whose default logging preference is taken from the
    /// [`LOG_ENV_VAR`] environment variable.
    ///
    /// The variable is read once, here; nothing else in the crate consults
    /// the environment.
    pub fn from_env() -> Self {
        Self {
            credentials: None,
            logging: std::env::var(LOG_ENV_VAR).ok(),
        }
    }

    /// Attaches a credential provider consulted at every chain assembly.
    #[must_use]
    pub fn with_credentials(mut self, credentials: OAuth2Params) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the default logging preference used when `client_for_host` is
    /// called without one.
    #[must_use]
    pub fn with_default_logging(mut self, logging: impl Into<String>) -> Self {
        self.logging = Some(logging.into());
        self
    }

    /// Replaces the attached credential provider.
    pub fn set_credentials(&mut self, credentials: OAuth2Params) {
        self.credentials = Some(credentials);
    }

    /// Returns the attached credential provider, if any.
    pub fn credentials(&self) -> Option<&OAuth2Params> {
        self.credentials.as_ref()
    }

    /// Returns the attached credential provider for mutation, typically to
    /// fetch or replace a token between builds.
    pub fn credentials_mut(&mut self) -> Option<&mut OAuth2Params> {
        self.credentials.as_mut()
    }

    /// Overrides or clears the remembered logging preference.
    pub fn set_logging(&mut self, logging: Option<String>) {
        self.logging = logging;
    }

    /// Assembles a handler chain from the current configuration.
    ///
    /// This is the extension point: take the chain, insert custom stages
    /// around the built-in three, and apply it with
    /// [`client_with_chain`](Self::client_with_chain).
    pub fn handler_chain(&self) -> HandlerChain {
        HandlerChain::assemble(self.credentials.as_ref(), self.logging.as_deref())
    }

    /// Builds a client that sends requests to `host`.
    ///
    /// `host` must be a non-empty absolute URL (scheme included). An explicit
    /// `logging` argument is recorded as the remembered preference before the
    /// chain is assembled; see the type-level docs for the resolution rule.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError`] when `host` is empty or not a valid
    /// address, or when a stage cannot be applied. A failed build produces no
    /// client.
    pub fn client_for_host(
        &mut self,
        host: &str,
        logging: Option<&str>,
    ) -> Result<HttpClient, ConfigError> {
        let base_url = Self::parse_host(host)?;
        if let Some(preference) = logging {
            self.logging = Some(preference.to_string());
        }
        let chain = self.handler_chain();
        let mut connection = ConnectionBuilder::new(base_url);
        chain.apply(&mut connection)?;
        connection.connect()
    }

    /// Builds a client for `host` using a caller-customized chain.
    ///
    /// Unlike [`client_for_host`](Self::client_for_host) this neither reads
    /// nor mutates the remembered logging preference; the chain already
    /// captured whatever state it was assembled from.
    pub fn client_with_chain(
        &self,
        host: &str,
        chain: &HandlerChain,
    ) -> Result<HttpClient, ConfigError> {
        let base_url = Self::parse_host(host)?;
        let mut connection = ConnectionBuilder::new(base_url);
        chain.apply(&mut connection)?;
        connection.connect()
    }

    fn parse_host(host: &str) -> Result<Url, ConfigError> {
        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        Url::parse(host).map_err(|source| ConfigError::InvalidHost {
            host: host.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;
    use url::Url;

    use super::*;

    #[test]
    fn test_empty_host_is_rejected() {
        let mut factory = ClientFactory::new();
        let result = factory.client_for_host("", None);
        assert!(matches!(result, Err(ConfigError::MissingHost)));
    }

    #[test]
    fn test_host_without_scheme_is_rejected() {
        let mut factory = ClientFactory::new();
        let result = factory.client_for_host("api.example.com", None);
        assert!(matches!(result, Err(ConfigError::InvalidHost { .. })));
    }

    #[test]
    fn test_client_is_bound_to_the_host() {
        let mut factory = ClientFactory::new();
        let client = factory
            .client_for_host("http://api.example.com", None)
            .expect("client builds");
        insta::assert_snapshot!(client.base_url(), @"http://api.example.com/");
    }

    fn applied(chain: &HandlerChain) -> ConnectionBuilder {
        let base_url = Url::parse("http://example.com").expect("valid URL");
        let mut connection = ConnectionBuilder::new(base_url);
        chain.apply(&mut connection).expect("chain applies");
        connection
    }

    #[test]
    fn test_no_logging_by_default() {
        let factory = ClientFactory::new();
        let connection = applied(&factory.handler_chain());
        assert!(connection.logging().is_none());
    }

    #[test]
    fn test_default_logging_applies_when_argument_absent() {
        let factory = ClientFactory::new().with_default_logging("info");
        let connection = applied(&factory.handler_chain());
        let policy = connection.logging().expect("policy attached");
        assert!(!policy.logs_bodies());
    }

    #[test]
    fn test_explicit_logging_argument_is_remembered() {
        let mut factory = ClientFactory::new().with_default_logging("info");
        factory
            .client_for_host("http://api.example.com", Some("debug"))
            .expect("client builds");

        // The explicit argument replaced the remembered preference.
        let connection = applied(&factory.handler_chain());
        let policy = connection.logging().expect("policy attached");
        assert!(policy.logs_bodies());
    }

    #[test]
    fn test_set_logging_clears_the_preference() {
        let mut factory = ClientFactory::new().with_default_logging("debug");
        factory.set_logging(None);
        let connection = applied(&factory.handler_chain());
        assert!(connection.logging().is_none());
    }

    #[test]
    fn test_chain_reads_credentials_at_assembly_time() {
        let mut credentials = OAuth2Params::new();
        credentials.set_token("first");
        let mut factory = ClientFactory::new().with_credentials(credentials);

        let before = applied(&factory.handler_chain());

        factory
            .credentials_mut()
            .expect("credentials attached")
            .set_token("second");
        let after = applied(&factory.handler_chain());

        let header = |connection: &ConnectionBuilder| {
            connection
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        assert_eq!(header(&before).as_deref(), Some("bearer first"));
        assert_eq!(header(&after).as_deref(), Some("bearer second"));
    }

    #[test]
    fn test_factory_without_credentials_builds_unauthenticated_chain() {
        let factory = ClientFactory::new();
        let connection = applied(&factory.handler_chain());
        assert!(connection.headers().get(AUTHORIZATION).is_none());
    }
}
