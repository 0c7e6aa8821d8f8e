//! Transcription service output document.

use serde::Deserialize;

use crate::error::{ModelError, ModelResult};

/// The subset of the transcript JSON the summarizer reads.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptDocument {
    #[serde(rename = "jobName", default)]
    pub job_name: Option<String>,
    pub results: TranscriptResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResults {
    #[serde(default)]
    pub transcripts: Vec<TranscriptText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptText {
    pub transcript: String,
}

impl TranscriptDocument {
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Text of the first transcript alternative.
    pub fn first_transcript(&self) -> ModelResult<&str> {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
            .ok_or_else(|| {
                ModelError::EmptyTranscript(self.job_name.clone().unwrap_or_default())
            })
    }
}
