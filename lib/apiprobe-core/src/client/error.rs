/// Errors raised while building a client.
///
/// Building covers host validation, handler-chain application, and transport
/// initialization. A failed build produces no client and leaves the factory
/// untouched apart from its remembered logging preference.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum ConfigError {
    /// The host given to `client_for_host` was empty.
    #[display("client host must not be empty")]
    MissingHost,

    /// The host could not be parsed as an absolute URL.
    #[display("invalid client host '{host}': {source}")]
    InvalidHost {
        /// The host string that was rejected.
        host: String,
        /// The underlying URL parse error.
        source: url::ParseError,
    },

    /// A token type was empty or otherwise unusable as an authorization scheme.
    #[display("invalid token type '{token_type}': must be a non-empty scheme")]
    InvalidTokenType {
        /// The rejected token type.
        token_type: String,
    },

    /// The authorization header could not be constructed from the captured
    /// token and token type.
    #[display("authorization header could not be constructed: {reason}")]
    InvalidAuthorization {
        /// Description of the invalid characters or format issue.
        reason: String,
    },

    /// The underlying transport adapter failed to initialize.
    #[display("failed to initialize HTTP transport: {source}")]
    Transport {
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The handler chain finished without selecting a transport adapter.
    ///
    /// Occurs when a connection is built from a chain whose terminal
    /// transport stage was removed or never ran.
    #[display("handler chain did not select a transport adapter")]
    TransportNotSelected,
}

/// Errors raised while sending a request through a built client.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// HTTP transport error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection
    /// issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error when joining a request path onto the base URL.
    UrlError(url::ParseError),

    /// JSON serialization error while encoding a request body.
    JsonValueError(serde_json::Error),

    /// The response body was not decoded as JSON.
    ///
    /// Occurs when JSON access is requested on a response whose content-type
    /// did not match the JSON filter, so the body passed through undecoded.
    #[display("response body was not decoded as JSON (content-type '{content_type}')")]
    #[from(skip)]
    UnsupportedJsonBody {
        /// The content-type the response declared, or `<none>`.
        content_type: String,
    },

    /// JSON response deserialization failure.
    ///
    /// Raised only for responses the content-type filter selected for
    /// decoding; the offending body is attached for debugging.
    #[display("failed to decode JSON from '{url}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The request URL where the error occurred.
        url: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_host_display() {
        assert_eq!(
            ConfigError::MissingHost.to_string(),
            "client host must not be empty"
        );
    }

    #[test]
    fn test_invalid_host_display() {
        let source = url::Url::parse("example.com").expect_err("relative URL");
        let error = ConfigError::InvalidHost {
            host: "example.com".to_string(),
            source,
        };
        let message = error.to_string();
        assert!(message.starts_with("invalid client host 'example.com':"));
    }

    #[test]
    fn test_transport_not_selected_display() {
        assert_eq!(
            ConfigError::TransportNotSelected.to_string(),
            "handler chain did not select a transport adapter"
        );
    }

    #[test]
    fn test_json_error_display_includes_body() {
        let error = serde_json::from_str::<serde_json::Value>("nope").expect_err("invalid JSON");
        let error = ClientError::JsonError {
            url: "http://example.com/users".to_string(),
            error,
            body: "nope".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("http://example.com/users"));
        assert!(message.ends_with("nope"));
    }
}
