//! Cut each shot into a standalone clip and classify it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vsum_media::MediaToolkit;
use vsum_models::{ArtifactLayout, AvPresence, SegmentBatch, SegmentRecord, VideoRef};
use vsum_storage::{ObjectStore, CONTENT_TYPE_JPEG, CONTENT_TYPE_MP4};

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;

const OPERATION: &str = "generate_video_segments";

/// Produces one clip (and, for clips with sound and picture, one thumbnail)
/// per segment, and sets each segment's presence flag.
pub struct ClipGenerator {
    store: Arc<dyn ObjectStore>,
    media: Arc<dyn MediaToolkit>,
    layout: ArtifactLayout,
    work_dir: PathBuf,
}

/// Per-invocation context shared by the segment loop.
struct ClipRun<'a> {
    video: &'a VideoRef,
    video_name: &'a str,
    source: &'a Path,
    scratch: &'a Path,
    logger: &'a BatchLogger,
}

impl ClipGenerator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        media: Arc<dyn MediaToolkit>,
        layout: ArtifactLayout,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            media,
            layout,
            work_dir: work_dir.into(),
        }
    }

    pub async fn handle(&self, batch: SegmentBatch) -> WorkerResult<SegmentBatch> {
        let logger = BatchLogger::new(video_label(batch.video()), OPERATION);
        logger.log_start(&format!("{} segments", batch.items.len()));

        match self.generate(batch, &logger).await {
            Ok(batch) => {
                logger.log_completion(&format!(
                    "{} of {} clips have audio and video",
                    batch.segments_with_av().count(),
                    batch.items.len()
                ));
                Ok(batch)
            }
            Err(e) => {
                logger.log_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn generate(
        &self,
        mut batch: SegmentBatch,
        logger: &BatchLogger,
    ) -> WorkerResult<SegmentBatch> {
        let video = batch.video().clone();
        let video_name = video.video_name()?;

        // Removed on drop, whichever way this function returns.
        tokio::fs::create_dir_all(&self.work_dir).await?;
        let scratch = tempfile::Builder::new()
            .prefix("vsum-clips-")
            .tempdir_in(&self.work_dir)?;

        // Kept apart from the per-segment directories so an upload named
        // like a clip (`1.mp4`) cannot be overwritten by one.
        let source_dir = scratch.path().join("source");
        tokio::fs::create_dir(&source_dir).await?;
        let source = source_dir.join(video.file_name()?);
        self.store
            .download_file(video.bucket(), video.key(), &source)
            .await?;

        let run = ClipRun {
            video: &video,
            video_name,
            source: &source,
            scratch: scratch.path(),
            logger,
        };
        for segment in batch.items.iter_mut() {
            self.process_segment(&run, segment).await?;
        }

        Ok(batch)
    }

    async fn process_segment(
        &self,
        run: &ClipRun<'_>,
        segment: &mut SegmentRecord,
    ) -> WorkerResult<()> {
        let index = segment.index();
        let bucket = run.video.bucket();

        let segment_dir = tempfile::Builder::new()
            .prefix(&format!("segment-{}-", index))
            .tempdir_in(run.scratch)?;
        let clip_path = segment_dir.path().join(ArtifactLayout::clip_file_name(index));
        self.media
            .trim_clip(
                run.source,
                &clip_path,
                segment.start_secs(),
                segment.duration_secs(),
            )
            .await?;
        self.store
            .upload_file(
                bucket,
                &self.layout.clip_key(run.video_name, index),
                &clip_path,
                CONTENT_TYPE_MP4,
            )
            .await?;

        let manifest = self.media.probe_streams(&clip_path).await?;
        let presence = AvPresence::from_streams(manifest.has_audio, manifest.has_video);

        if presence == AvPresence::Yes {
            let thumbnail_path = segment_dir
                .path()
                .join(ArtifactLayout::thumbnail_file_name(index));
            self.media
                .extract_thumbnail(&clip_path, &thumbnail_path)
                .await?;
            self.store
                .upload_file(
                    bucket,
                    &self.layout.thumbnail_key(run.video_name, index),
                    &thumbnail_path,
                    CONTENT_TYPE_JPEG,
                )
                .await?;
        }

        let segment_path = segment_dir.path().to_path_buf();
        if let Err(e) = segment_dir.close() {
            run.logger.log_warning(&format!(
                "could not remove {}: {}",
                segment_path.display(),
                e
            ));
        }
        segment.presence = Some(presence);
        run.logger.log_segment(
            index,
            &format!(
                "clip {:.3}s+{:.3}s, audio and video: {}",
                segment.start_secs(),
                segment.duration_secs(),
                presence
            ),
        );
        Ok(())
    }
}
