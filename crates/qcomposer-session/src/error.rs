//! Error types for the session crate.

use thiserror::Error;

/// Errors reported by a simulation/code-generation service.
///
/// The session logs these and keeps the last good result on screen; they
/// never reach the user as a blocking error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Could not reach the service.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete in time.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with an error status.
    #[error("Service returned {status}: {message}")]
    Api {
        /// HTTP-style status code.
        status: u16,
        /// Body or reason text.
        message: String,
    },

    /// The answer could not be understood.
    #[error("Malformed service response: {0}")]
    InvalidResponse(String),

    /// The client is misconfigured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The call ended without an answer (it panicked or was cancelled).
    #[error("Service call aborted: {0}")]
    Aborted(String),
}

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidVar {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
