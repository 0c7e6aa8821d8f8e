//! Speech-to-text jobs.

use async_trait::async_trait;
use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat, TranscriptionJob};
use aws_sdk_transcribe::Client;
use tracing::{debug, info};
use uuid::Uuid;
use vsum_models::TranscriptionStatus;

use crate::error::{MlError, MlResult};

/// Prefix of every transcription job name the pipeline submits.
pub const TRANSCRIPTION_JOB_PREFIX: &str = "GenerateVideoClipTranscript";

/// A fresh, unique job name.
pub fn new_job_name() -> String {
    format!("{}-{}", TRANSCRIPTION_JOB_PREFIX, Uuid::new_v4())
}

/// One clip to transcribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub job_name: String,
    /// `s3://bucket/key` of the MP4 clip.
    pub media_uri: String,
    pub output_bucket: String,
    pub output_key: String,
}

#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Submit a job; returns its initial status.
    async fn start_job(&self, request: &TranscriptionRequest) -> MlResult<TranscriptionStatus>;

    /// Current status of a previously submitted job.
    async fn job_status(&self, job_name: &str) -> MlResult<TranscriptionStatus>;
}

/// `TranscriptionService` backed by Amazon Transcribe.
#[derive(Clone)]
pub struct TranscribeService {
    client: Client,
}

impl TranscribeService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

fn job_status_of(job: Option<&TranscriptionJob>) -> MlResult<TranscriptionStatus> {
    let status = job
        .and_then(|j| j.transcription_job_status())
        .ok_or(MlError::MissingField("TranscriptionJobStatus"))?;

    TranscriptionStatus::parse(status.as_str())
        .ok_or_else(|| MlError::UnknownStatus(status.as_str().to_string()))
}

#[async_trait]
impl TranscriptionService for TranscribeService {
    async fn start_job(&self, request: &TranscriptionRequest) -> MlResult<TranscriptionStatus> {
        let response = self
            .client
            .start_transcription_job()
            .transcription_job_name(&request.job_name)
            .media(Media::builder().media_file_uri(&request.media_uri).build())
            .media_format(MediaFormat::Mp4)
            .language_code(LanguageCode::EnUs)
            .output_bucket_name(&request.output_bucket)
            .output_key(&request.output_key)
            .send()
            .await
            .map_err(|e| MlError::transcription(format!("{}: {}", request.job_name, e)))?;

        let status = job_status_of(response.transcription_job())?;
        info!(
            "Started transcription job {} for {} ({})",
            request.job_name, request.media_uri, status
        );
        Ok(status)
    }

    async fn job_status(&self, job_name: &str) -> MlResult<TranscriptionStatus> {
        let response = self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| MlError::transcription(format!("{}: {}", job_name, e)))?;

        let status = job_status_of(response.transcription_job())?;
        debug!("Transcription job {} is {}", job_name, status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_transcribe::types::TranscriptionJobStatus;

    #[test]
    fn test_job_names_are_unique() {
        let a = new_job_name();
        let b = new_job_name();
        assert_ne!(a, b);
        assert!(a.starts_with("GenerateVideoClipTranscript-"));
        assert_eq!(a.len(), TRANSCRIPTION_JOB_PREFIX.len() + 1 + 36);
    }

    #[test]
    fn test_status_mapping() {
        let job = TranscriptionJob::builder()
            .transcription_job_status(TranscriptionJobStatus::InProgress)
            .build();
        assert_eq!(
            job_status_of(Some(&job)).unwrap(),
            TranscriptionStatus::InProgress
        );
    }

    #[test]
    fn test_missing_job_is_error() {
        assert!(matches!(
            job_status_of(None),
            Err(MlError::MissingField(_))
        ));
    }
}
