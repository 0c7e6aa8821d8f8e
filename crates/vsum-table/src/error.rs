//! Table error types.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur talking to the report table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Put failed: {0}")]
    PutFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Malformed row: missing attribute {0}")]
    MalformedRow(&'static str),
}

impl TableError {
    pub fn put_failed(msg: impl Into<String>) -> Self {
        Self::PutFailed(msg.into())
    }

    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }
}
