//! Error types for the API client.

use std::fmt;

/// The gateway answered with a status the operation does not accept.
///
/// Carries the raw response text as `message` and the HTTP status as `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    code: u16,
}

impl HttpError {
    /// Status used when the caller does not supply one.
    pub const DEFAULT_CODE: u16 = 500;

    /// Creates an error with the default code (500).
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_code(message, Self::DEFAULT_CODE)
    }

    /// Creates an error carrying the given HTTP status.
    pub fn with_code(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// HTTP status code returned by the gateway.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Raw response body text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.code, self.message)
    }
}

impl std::error::Error for HttpError {}

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The gateway returned an unexpected status.
    #[error(transparent)]
    Http(#[from] HttpError),
    /// The request never completed (connection refused, timeout, DNS failure).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// A success response whose body is not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Encode(#[source] serde_json::Error),
    /// Host, port and endpoint did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => Some(e.code()),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_defaults_to_500() {
        let err = HttpError::new("boom");
        assert_eq!(err.code(), 500);
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn http_error_keeps_explicit_code() {
        let err = HttpError::with_code("Not found", 404);
        assert_eq!(err.code(), 404);
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn status_comes_from_http_error() {
        let err = Error::from(HttpError::with_code("Server error", 503));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503: Server error");
    }

    #[test]
    fn decode_error_has_no_status() {
        let json_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = Error::Decode(json_err);
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("Failed to parse response"));
    }
}
