//! Error types for the HTTP adapter.

use qcomposer_session::ServiceError;
use thiserror::Error;

/// Result type for HTTP adapter operations.
pub type HttpServiceResult<T> = Result<T, HttpServiceError>;

/// Errors that can occur when talking to the composer service.
#[derive(Debug, Error)]
pub enum HttpServiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl From<HttpServiceError> for ServiceError {
    fn from(e: HttpServiceError) -> Self {
        match e {
            HttpServiceError::Http(err) if err.is_timeout() => ServiceError::Timeout(err.to_string()),
            HttpServiceError::Http(err) if err.is_decode() => {
                ServiceError::InvalidResponse(err.to_string())
            }
            HttpServiceError::Http(err) => ServiceError::Unavailable(err.to_string()),
            HttpServiceError::Json(err) => ServiceError::InvalidResponse(err.to_string()),
            HttpServiceError::ApiError { status, message } => ServiceError::Api { status, message },
            HttpServiceError::InvalidUrl { .. } | HttpServiceError::Configuration(_) => {
                ServiceError::Configuration(e.to_string())
            }
        }
    }
}
