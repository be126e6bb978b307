//! Error types for remote field operations.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by a [`crate::FieldClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed field does not exist on the remote service.
    ///
    /// The display form matches the service's own wording so logs stay
    /// consistent with what the wire reports.
    #[error("Field: {field_id} was not found.")]
    FieldNotFound { field_id: i64 },

    /// Non-success HTTP response that isn't a field-not-found.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a body we couldn't decode.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}
