//! Error types for Flashmemo API calls.

use thiserror::Error;

/// Error type for every `ApiClient` operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport-level HTTP error from reqwest.
    ///
    /// Includes connection failures, timeouts, and TLS errors.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own `message` field when the body carried
    /// one, otherwise the canonical reason for the status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// A success response lacked a field the caller needs.
    #[error("Response missing required field: {0}")]
    MissingField(&'static str),

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client could not be constructed from configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether retrying the same call later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of a rejected call, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
