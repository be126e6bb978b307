//! Error types for field entity operations.

use thiserror::Error;

/// Result type for field entity operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors that can occur on a field entity.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Remote client failure, propagated unmodified.
    #[error(transparent)]
    Client(#[from] gridbase_client::ClientError),

    /// Portable snapshot input wasn't an object.
    #[error("invalid field snapshot: {message}")]
    Snapshot { message: String },

    /// A snapshot string failed to parse, or a client snapshot failed to
    /// decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
