//! Submit one transcription job per usable clip.

use std::sync::Arc;

use vsum_ml_client::{new_job_name, TranscriptionRequest, TranscriptionService};
use vsum_models::{ArtifactLayout, SegmentBatch};

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;

const OPERATION: &str = "generate_video_clip_transcripts";

/// Starts transcription of every clip not known to lack audio or video.
///
/// A segment that already carries a job name was submitted by an earlier
/// delivery of the same batch and is left alone.
pub struct TranscriptGenerator {
    transcriber: Arc<dyn TranscriptionService>,
    layout: ArtifactLayout,
}

impl TranscriptGenerator {
    pub fn new(transcriber: Arc<dyn TranscriptionService>, layout: ArtifactLayout) -> Self {
        Self {
            transcriber,
            layout,
        }
    }

    pub async fn handle(&self, mut batch: SegmentBatch) -> WorkerResult<SegmentBatch> {
        let video = batch.video().clone();
        let video_name = video.video_name()?;
        let logger = BatchLogger::new(video_label(&video), OPERATION);
        logger.log_start(&format!("{} segments", batch.items.len()));

        let mut submitted = 0usize;
        for segment in batch.items.iter_mut() {
            let index = segment.index();
            if segment.lacks_audio_or_video() {
                logger.log_skip(index, "clip lacks audio or video");
                continue;
            }
            if let Some(existing) = &segment.transcription_job_name {
                logger.log_skip(index, &format!("already submitted as {}", existing));
                continue;
            }

            let request = TranscriptionRequest {
                job_name: new_job_name(),
                media_uri: self.layout.clip_uri(video.bucket(), video_name, index),
                output_bucket: video.bucket().to_string(),
                output_key: self.layout.transcript_key(video_name, index),
            };
            let status = match self.transcriber.start_job(&request).await {
                Ok(status) => status,
                Err(e) => {
                    logger.log_error(&format!("segment {}: {}", index, e));
                    return Err(e.into());
                }
            };

            logger.log_segment(index, &format!("job {} is {}", request.job_name, status));
            segment.record_transcription_job(request.job_name, status);
            submitted += 1;
        }

        logger.log_completion(&format!("{} transcription jobs started", submitted));
        Ok(batch)
    }
}
