//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Report rendering failed: {0}")]
    ReportFailed(String),

    #[error("Model error: {0}")]
    Model(#[from] vsum_models::ModelError),

    #[error("Media error: {0}")]
    Media(#[from] vsum_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] vsum_storage::StorageError),

    #[error("Table error: {0}")]
    Table(#[from] vsum_table::TableError),

    #[error("ML service error: {0}")]
    Ml(#[from] vsum_ml_client::MlError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] vsum_workflow::WorkflowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn report_failed(msg: impl Into<String>) -> Self {
        Self::ReportFailed(msg.into())
    }

    /// The error is a missing object in storage.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkerError::Storage(e) if e.is_not_found())
    }
}
