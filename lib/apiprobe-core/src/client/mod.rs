use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

mod auth;
pub use self::auth::SecureString;

mod chain;
pub use self::chain::{
    ConnectionBuilder, HandlerChain, RequestStage, ResponseStage, Stage, TransportStage,
};

mod error;
pub use self::error::{ClientError, ConfigError};

mod factory;
pub use self::factory::{ClientFactory, LOG_ENV_VAR};

mod oauth2;
pub use self::oauth2::{AuthError, ClientOptions, OAuth2Params};

mod response;
pub use self::response::{ApiResponse, LogPolicy, ResponseBody};

#[cfg(test)]
mod integration_tests;

/// A client bound to one host, produced by applying a handler chain.
///
/// Every request routed through this client passes through the pipeline
/// configuration captured when it was built: bodies are JSON-encoded, the
/// authorization header (if any) is attached, responses are logged per the
/// captured policy and decoded per the content-type filter. The client is
/// immutable; rebuild through the factory to pick up configuration changes.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::blocking::Client,
    base_url: Url,
    headers: HeaderMap,
    json_requests: bool,
    json_responses: bool,
    logging: Option<LogPolicy>,
}

impl HttpClient {
    pub(crate) fn from_parts(
        http: reqwest::blocking::Client,
        base_url: Url,
        headers: HeaderMap,
        json_requests: bool,
        json_responses: bool,
        logging: Option<LogPolicy>,
    ) -> Self {
        Self {
            http,
            base_url,
            headers,
            json_requests,
            json_responses,
            logging,
        }
    }

    /// Returns the host this client sends requests to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request to `path`, relative to the base URL.
    pub fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, path, None)
    }

    /// Sends a HEAD request to `path`.
    pub fn head(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::HEAD, path, None)
    }

    /// Sends a DELETE request to `path`.
    pub fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::DELETE, path, None)
    }

    /// Sends a POST request with a JSON-encoded body.
    pub fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, path, Some(serde_json::to_vec(body)?))
    }

    /// Sends a PUT request with a JSON-encoded body.
    pub fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, path, Some(serde_json::to_vec(body)?))
    }

    /// Sends a PATCH request with a JSON-encoded body.
    pub fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PATCH, path, Some(serde_json::to_vec(body)?))
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.base_url.join(path)?;
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .headers(self.headers.clone());

        if let Some(bytes) = body {
            if self.json_requests {
                request = request.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
            }
            if let Some(policy) = self.logging
                && policy.logs_bodies()
            {
                debug!(body = %String::from_utf8_lossy(&bytes), "request body");
            }
            request = request.body(bytes);
        }

        if self.logging.is_some() {
            info!(%method, %url, "sending request");
        }
        let response = request.send()?;

        let status = response.status();
        let headers = response.headers().clone();
        if self.logging.is_some() {
            info!(%method, %url, %status, "received response");
        }

        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes()?.to_vec();
        if let Some(policy) = self.logging
            && policy.logs_bodies()
        {
            debug!(body = %String::from_utf8_lossy(&bytes), "response body");
        }

        let body = ResponseBody::decode(&url, content_type.as_deref(), bytes, self.json_responses)?;
        Ok(ApiResponse::new(status, headers, body))
    }
}
