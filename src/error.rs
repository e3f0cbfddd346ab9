//! Error types for Tenable.sc API operations.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during Tenable.sc API operations.
#[derive(Debug, Error)]
pub enum TenableError {
    /// Configuration is missing or incomplete.
    #[error("Tenable configuration required: {0}")]
    ConfigMissing(String),

    /// The base URL could not be parsed or cannot carry relative paths.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A credential could not be encoded as an HTTP header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// A relative request path could not be resolved against the base URL.
    #[error("Invalid request path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// A resource identifier could not be normalized to an integer.
    #[error("Invalid resource id '{0}': expected an integer")]
    InvalidId(String),

    /// Caller-supplied input was rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a status outside the 2xx range.
    #[error("Tenable API error: {0}")]
    Api(ApiError),

    /// The server answered with an error status, but its body could not be read.
    #[error("Failed to read error response body (status {status}): {source}")]
    BodyRead {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be encoded.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A successful response did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl TenableError {
    /// The HTTP status code, when the server produced a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TenableError::Api(err) => Some(err.status),
            TenableError::BodyRead { status, .. } => Some(*status),
            TenableError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The structured API error, if this is a protocol failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            TenableError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for Tenable operations.
pub type Result<T> = core::result::Result<T, TenableError>;

/// Error returned by the Tenable.sc API for a non-2xx response.
///
/// JSON bodies are decoded into the message fields; any other body is kept
/// verbatim in [`ApiError::body`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    /// Numeric HTTP status.
    pub status: u16,
    /// Status line as received (e.g. `500 Internal Server Error`).
    pub status_line: String,
    /// Human-readable messages (`errorMessages`).
    pub messages: Vec<String>,
    /// Field name to validation message (`errors`).
    pub field_errors: BTreeMap<String, String>,
    /// Envelope error code (`error_code`), when present.
    pub error_code: Option<i64>,
    /// Envelope error message (`error_msg`), when present.
    pub error_msg: Option<String>,
    /// Raw body text for responses that were not JSON.
    pub body: Option<String>,
}

/// Wire shape of a JSON error body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

impl ApiError {
    /// Build an error from a decoded JSON error body.
    pub(crate) fn from_body(status: u16, status_line: String, body: ErrorBody) -> Self {
        Self {
            status,
            status_line,
            messages: body.error_messages,
            field_errors: body.errors,
            error_code: body.error_code,
            error_msg: body.error_msg.filter(|m| !m.is_empty()),
            body: None,
        }
    }

    /// Build an error carrying an opaque, non-JSON body.
    pub(crate) fn from_text(status: u16, status_line: String, body: String) -> Self {
        Self {
            status,
            status_line,
            body: Some(body),
            ..Default::default()
        }
    }

    /// The most specific message available.
    pub fn message(&self) -> String {
        if let Some(first) = self.messages.first() {
            return first.clone();
        }
        if let Some((field, msg)) = self.field_errors.iter().next() {
            return format!("{field} - {msg}");
        }
        if let Some(msg) = &self.error_msg {
            return msg.clone();
        }
        match &self.body {
            Some(body) if !body.is_empty() => body.clone(),
            _ => self.status_line.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(body) = &self.body {
            return write!(f, "got response status {}: {}", self.status_line, body);
        }
        let has_message = !self.messages.is_empty()
            || !self.field_errors.is_empty()
            || self.error_msg.is_some();
        if !has_message {
            return write!(f, "request failed with status {}", self.status_line);
        }
        write!(f, "{} (status {})", self.message(), self.status_line)?;
        if let Some(code) = self.error_code.filter(|c| *c != 0) {
            write!(f, " [error code {code}]")?;
        }
        Ok(())
    }
}
