//! Summarize each clip transcript with a language model.

use std::sync::Arc;

use vsum_ml_client::TextGenerator;
use vsum_models::{ArtifactLayout, SegmentBatch, SegmentRecord, TranscriptDocument, VideoRef};
use vsum_storage::{ObjectStore, CONTENT_TYPE_TEXT};

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;

const OPERATION: &str = "summarize_video_clips";

/// Instruction appended after the transcript.
pub const SUMMARY_INSTRUCTION: &str = "Summarize the context above.";

pub fn summary_prompt(transcript: &str) -> String {
    format!("{}\n\n{}", transcript, SUMMARY_INSTRUCTION)
}

/// Writes `{summary}/{video}/{index}.txt` for every clip with audio and video.
pub struct Summarizer {
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn TextGenerator>,
    layout: ArtifactLayout,
}

impl Summarizer {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn TextGenerator>,
        layout: ArtifactLayout,
    ) -> Self {
        Self {
            store,
            generator,
            layout,
        }
    }

    /// Returns the batch unchanged.
    pub async fn handle(&self, batch: SegmentBatch) -> WorkerResult<SegmentBatch> {
        let video = batch.video();
        let video_name = video.video_name()?;
        let logger = BatchLogger::new(video_label(video), OPERATION);
        logger.log_start(&format!(
            "{} clips to summarize",
            batch.segments_with_av().count()
        ));

        for segment in batch.segments_with_av() {
            if let Err(e) = self.summarize(video, video_name, segment).await {
                logger.log_error(&format!("segment {}: {}", segment.index(), e));
                return Err(e);
            }
            logger.log_segment(segment.index(), "summary stored");
        }

        logger.log_completion("summaries stored");
        Ok(batch)
    }

    async fn summarize(
        &self,
        video: &VideoRef,
        video_name: &str,
        segment: &SegmentRecord,
    ) -> WorkerResult<()> {
        let index = segment.index();
        let transcript_key = self.layout.transcript_key(video_name, index);
        let bytes = self
            .store
            .download_bytes(video.bucket(), &transcript_key)
            .await?;
        let document = TranscriptDocument::from_slice(&bytes)?;

        let summary = self
            .generator
            .generate(&summary_prompt(document.first_transcript()?))
            .await?;

        self.store
            .upload_bytes(
                video.bucket(),
                &self.layout.summary_key(video_name, index),
                summary.into_bytes(),
                CONTENT_TYPE_TEXT,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::mocks::MockGenerator;
    use crate::WorkerError;
    use vsum_ml_client::MlError;
    use vsum_models::AvPresence;
    use vsum_storage::MemoryStore;

    const BUCKET: &str = "media";

    fn transcript(text: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "jobName": "GenerateVideoClipTranscript-1",
            "results": {"transcripts": [{"transcript": text}], "items": []},
            "status": "COMPLETED"
        }))
        .unwrap()
    }

    fn batch(presence: &[AvPresence]) -> SegmentBatch {
        let items = presence
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut s = SegmentRecord::new(i as u64, 0, 1000);
                s.presence = Some(*p);
                s
            })
            .collect();
        SegmentBatch::new(VideoRef::new(BUCKET, "uploads/talk.mp4"), items)
    }

    fn layout() -> ArtifactLayout {
        ArtifactLayout::new("staging", "summary", "report")
    }

    #[test]
    fn test_prompt_format() {
        assert_eq!(
            summary_prompt("hello world"),
            "hello world\n\nSummarize the context above."
        );
    }

    #[tokio::test]
    async fn test_summaries_written_for_usable_clips_only() {
        let store = Arc::new(MemoryStore::new());
        store.insert(BUCKET, "staging/talk/0.json", transcript("first clip")).await;
        store.insert(BUCKET, "staging/talk/2.json", transcript("third clip")).await;

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .withf(|p| p == "first clip\n\nSummarize the context above.")
            .times(1)
            .returning(|_| Ok("Summary one.".to_string()));
        generator
            .expect_generate()
            .withf(|p| p.starts_with("third clip"))
            .times(1)
            .returning(|_| Ok("Summary three.".to_string()));

        let handler = Summarizer::new(store.clone(), Arc::new(generator), layout());
        let input = batch(&[AvPresence::Yes, AvPresence::No, AvPresence::Yes]);
        let out = handler.handle(input.clone()).await.unwrap();

        assert_eq!(out, input);
        assert_eq!(
            store.download_bytes(BUCKET, "summary/talk/0.txt").await.unwrap(),
            b"Summary one."
        );
        assert_eq!(
            store.download_bytes(BUCKET, "summary/talk/2.txt").await.unwrap(),
            b"Summary three."
        );
        assert!(store.get(BUCKET, "summary/talk/1.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_transcript_aborts() {
        let handler = Summarizer::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MockGenerator::new()),
            layout(),
        );
        let err = handler.handle(batch(&[AvPresence::Yes])).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_model_failure_aborts() {
        let store = Arc::new(MemoryStore::new());
        store.insert(BUCKET, "staging/talk/0.json", transcript("x")).await;

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(MlError::generation("ThrottlingException")));

        let handler = Summarizer::new(store, Arc::new(generator), layout());
        let err = handler.handle(batch(&[AvPresence::Yes])).await.unwrap_err();
        assert!(matches!(err, WorkerError::Ml(_)));
    }
}
