//! Error types for the wire crate.

use qcomposer_ir::InvariantViolation;
use thiserror::Error;

/// Why a snapshot token could not be turned back into a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    /// Empty token.
    #[error("Snapshot token is empty")]
    Empty,

    /// Not valid URL-safe base64.
    #[error("Invalid token encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Compression stream is corrupt.
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),

    /// Decompressed document exceeds the size limit.
    #[error("Snapshot exceeds {limit} bytes when decompressed")]
    TooLarge {
        /// The limit in bytes.
        limit: u64,
    },

    /// JSON parse failure or missing field.
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Document parsed but describes an inconsistent circuit.
    #[error("Snapshot describes an invalid circuit: {0}")]
    Invalid(#[from] InvariantViolation),
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
