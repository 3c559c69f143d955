use http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ClientError;

/// Decides whether a response body is eligible for JSON decoding.
///
/// The rule is a case-sensitive suffix match on the media type: the type must
/// end in `json` preceded by a word boundary. `application/json`,
/// `application/ld+json`, and `application/vnd.api+json` decode;
/// `text/html` and `application/foojson` pass through. Parameters after `;`
/// are ignored.
pub(crate) fn is_json_media_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    media_type.strip_suffix("json").is_some_and(|prefix| {
        prefix
            .chars()
            .next_back()
            .is_none_or(|before| !(before.is_ascii_alphanumeric() || before == '_'))
    })
}

/// Response logging behavior captured from the logging preference at
/// chain-assembly time.
///
/// Presence of a policy enables metadata logging (method, URL, status);
/// `bodies` additionally logs request and response bodies. Bodies are enabled
/// only when the preference case-insensitively equals `DEBUG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPolicy {
    bodies: bool,
}

impl LogPolicy {
    pub(crate) fn from_preference(preference: &str) -> Self {
        Self {
            bodies: preference.eq_ignore_ascii_case("DEBUG"),
        }
    }

    /// Returns `true` when request and response bodies should be logged.
    pub fn logs_bodies(self) -> bool {
        self.bodies
    }
}

/// A decoded response body.
///
/// JSON decoding is attempted only for responses selected by the content-type
/// filter; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body was decoded as JSON.
    Json(serde_json::Value),
    /// The body passed through undecoded as UTF-8 text.
    Text(String),
    /// The body passed through undecoded and is not valid UTF-8.
    Bytes(Vec<u8>),
    /// The response carried no body.
    Empty,
}

impl ResponseBody {
    /// Decodes a raw body according to the connection's response policy.
    pub(crate) fn decode(
        url: &Url,
        content_type: Option<&str>,
        bytes: Vec<u8>,
        decode_json: bool,
    ) -> Result<Self, ClientError> {
        if bytes.is_empty() {
            return Ok(Self::Empty);
        }
        if decode_json && content_type.is_some_and(is_json_media_type) {
            return match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(Self::Json(value)),
                Err(error) => Err(ClientError::JsonError {
                    url: url.to_string(),
                    error,
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                }),
            };
        }
        Ok(match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(error) => Self::Bytes(error.into_bytes()),
        })
    }
}

/// A response that has passed through the client's pipeline.
///
/// Holds the status, headers, and the body as left by the response stage:
/// decoded JSON for matching content types, raw text/bytes otherwise.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl ApiResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the declared content-type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    /// Returns the decoded body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Consumes the response and returns the decoded body.
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// Deserializes the decoded JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::UnsupportedJsonBody`] when the body passed
    /// through undecoded (the content-type did not match the JSON filter),
    /// or with a JSON error when the value does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        match &self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value.clone())?),
            _ => Err(ClientError::UnsupportedJsonBody {
                content_type: self.content_type().unwrap_or("<none>").to_string(),
            }),
        }
    }

    /// Returns the body as text when it passed through undecoded.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }
}
