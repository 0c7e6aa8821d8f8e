//! Aggregate transcription status for the orchestrator's poll loop.

use std::sync::Arc;

use vsum_ml_client::TranscriptionService;
use vsum_models::{AllJobStatus, SegmentBatch};

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;

const OPERATION: &str = "check_transcription_jobs";

/// Refreshes pending job statuses and sets `AllJobStatus`.
///
/// Segments are scanned in order. The first job still queued or running
/// after a refresh ends the scan with `IN_PROGRESS`; later segments are not
/// queried. Segments lacking audio or video, segments with no job and jobs
/// already in a terminal state are never queried.
pub struct JobStatusChecker {
    transcriber: Arc<dyn TranscriptionService>,
}

impl JobStatusChecker {
    pub fn new(transcriber: Arc<dyn TranscriptionService>) -> Self {
        Self { transcriber }
    }

    pub async fn handle(&self, mut batch: SegmentBatch) -> WorkerResult<SegmentBatch> {
        let logger = BatchLogger::new(video_label(batch.video()), OPERATION);

        let mut aggregate = AllJobStatus::Completed;
        for segment in batch.items.iter_mut() {
            let index = segment.index();
            if segment.lacks_audio_or_video() {
                continue;
            }
            let Some(job_name) = segment.transcription_job_name.clone() else {
                continue;
            };
            if segment
                .transcription_job_status
                .map(|s| s.is_terminal())
                .unwrap_or(false)
            {
                continue;
            }

            let status = match self.transcriber.job_status(&job_name).await {
                Ok(status) => status,
                Err(e) => {
                    logger.log_error(&format!("segment {}: {}", index, e));
                    return Err(e.into());
                }
            };
            segment.update_transcription_status(status);
            logger.log_segment(index, &format!("job {} is {}", job_name, status));

            if status.is_pending() {
                aggregate = AllJobStatus::InProgress;
                break;
            }
        }

        batch.all_job_status = Some(aggregate);
        logger.log_completion(&format!("all jobs: {}", aggregate));
        Ok(batch)
    }
}
