//! ML service error types.

use thiserror::Error;

/// Result type for ML service calls.
pub type MlResult<T> = Result<T, MlError>;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("Segment detection request failed: {0}")]
    SegmentDetection(String),

    #[error("Transcription request failed: {0}")]
    Transcription(String),

    #[error("Text generation request failed: {0}")]
    Generation(String),

    #[error("Service response missing {0}")]
    MissingField(&'static str),

    #[error("Unknown transcription job status: {0}")]
    UnknownStatus(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MlError {
    pub fn segment_detection(msg: impl Into<String>) -> Self {
        Self::SegmentDetection(msg.into())
    }

    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }
}
