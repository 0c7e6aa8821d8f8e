//! Upload event -> shot segmentation job.

use std::sync::Arc;

use vsum_ml_client::SegmentDetector;
use vsum_models::UploadEvent;

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;

const OPERATION: &str = "start_segment_detection";

/// Starts shot segmentation for every uploaded video in an event.
pub struct SegmentDetectionStarter {
    detector: Arc<dyn SegmentDetector>,
}

impl SegmentDetectionStarter {
    pub fn new(detector: Arc<dyn SegmentDetector>) -> Self {
        Self { detector }
    }

    /// Returns the started job ids, in record order.
    pub async fn handle(&self, event: UploadEvent) -> WorkerResult<Vec<String>> {
        event.ensure_records()?;

        let mut job_ids = Vec::with_capacity(event.records.len());
        for record in &event.records {
            let video = record.video()?;
            let logger = BatchLogger::new(video_label(&video), OPERATION);
            logger.log_start("starting shot segmentation");

            match self
                .detector
                .start_shot_detection(video.bucket(), video.key())
                .await
            {
                Ok(job_id) => {
                    logger.log_completion(&format!("segmentation job {}", job_id));
                    job_ids.push(job_id);
                }
                Err(e) => {
                    logger.log_error(&e.to_string());
                    return Err(e.into());
                }
            }
        }

        Ok(job_ids)
    }
}
