//! Model error types.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while interpreting pipeline payloads.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Transcript has no text: {0}")]
    EmptyTranscript(String),

    #[error("Event has no records")]
    EmptyEvent,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }
}
