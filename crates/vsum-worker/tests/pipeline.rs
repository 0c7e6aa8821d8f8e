//! End-to-end run of the per-batch stages against in-memory services.
//!
//! The orchestrator hands each stage the previous stage's JSON output, so the
//! batch is serialized between stages exactly as it would be on the wire.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::{ImageOutputFormat, Rgb, RgbImage};
use mockall::mock;
use serde_json::{json, Value};

use vsum_media::{MediaResult, MediaToolkit, StreamManifest};
use vsum_ml_client::{MlResult, TextGenerator, TranscriptionRequest, TranscriptionService};
use vsum_models::{
    AllJobStatus, ArtifactLayout, AvPresence, ReportRequest, SegmentBatch, TranscriptionStatus,
};
use vsum_storage::{MemoryStore, ObjectStore};
use vsum_table::{MemoryReportTable, ReportTable};
use vsum_worker::{ClipGenerator, JobStatusChecker, ReportBuilder, Summarizer, TranscriptGenerator};

const BUCKET: &str = "video-summary-media";

mock! {
    Transcriber {}
    #[async_trait]
    impl TranscriptionService for Transcriber {
        async fn start_job(&self, request: &TranscriptionRequest) -> MlResult<TranscriptionStatus>;
        async fn job_status(&self, job_name: &str) -> MlResult<TranscriptionStatus>;
    }
}

mock! {
    Generator {}
    #[async_trait]
    impl TextGenerator for Generator {
        async fn generate(&self, prompt: &str) -> MlResult<String>;
    }
}

/// Clips `0.mp4` and `2.mp4` have sound; `1.mp4` is silent.
struct SilentMiddleClip;

fn index_of(path: &Path) -> u64 {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse().ok())
        .unwrap_or(u64::MAX)
}

fn jpeg() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::from_pixel(48, 27, Rgb([30, 90, 150]))
        .write_to(&mut out, ImageOutputFormat::Jpeg(80))
        .unwrap();
    out.into_inner()
}

#[async_trait]
impl MediaToolkit for SilentMiddleClip {
    async fn trim_clip(&self, _: &Path, output: &Path, _: f64, _: f64) -> MediaResult<()> {
        tokio::fs::write(output, b"mp4").await?;
        Ok(())
    }

    async fn probe_streams(&self, path: &Path) -> MediaResult<StreamManifest> {
        let has_audio = index_of(path) != 1;
        Ok(StreamManifest {
            has_audio,
            has_video: true,
            stream_count: if has_audio { 2 } else { 1 },
        })
    }

    async fn extract_thumbnail(&self, _: &Path, output: &Path) -> MediaResult<()> {
        tokio::fs::write(output, jpeg()).await?;
        Ok(())
    }
}

fn layout() -> ArtifactLayout {
    ArtifactLayout::new("staging/", "summaries", "reports")
}

fn initial_batch() -> Value {
    let segment = |index: u64, start: u64, duration: u64| {
        json!({
            "ShotSegment": {"Index": index, "Confidence": 99.9},
            "Type": "SHOT",
            "StartTimestampMillis": start,
            "EndTimestampMillis": start + duration,
            "DurationMillis": duration,
            "StartFrameNumber": start / 40,
        })
    };
    json!({
        "BatchInput": {
            "Video": {"S3Object": {"Bucket": BUCKET, "Name": "uploads/keynote.mp4"}},
            "JobId": "segmentation-job-1"
        },
        "Items": [segment(0, 0, 4000), segment(1, 4000, 1500), segment(2, 5500, 3000)]
    })
}

fn wire<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

fn batch(value: Value) -> SegmentBatch {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_three_segment_pipeline() {
    let work = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let table = Arc::new(MemoryReportTable::new());
    store.insert(BUCKET, "uploads/keynote.mp4", b"source".to_vec()).await;

    // Clips
    let clips = ClipGenerator::new(store.clone(), Arc::new(SilentMiddleClip), layout(), work.path());
    let after_clips = wire(&clips.handle(batch(initial_batch())).await.unwrap());

    let presence: Vec<_> = after_clips["Items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["AudioOrVideoExists"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(presence, vec!["Yes", "No", "Yes"]);
    assert_eq!(after_clips["Items"][1]["StartFrameNumber"], 100);
    assert_eq!(after_clips["BatchInput"]["JobId"], "segmentation-job-1");

    // Transcription jobs: indices 0 and 2 only
    let mut transcriber = MockTranscriber::new();
    transcriber
        .expect_start_job()
        .withf(|r| r.media_uri == "s3://video-summary-media/staging/keynote/0.mp4")
        .times(1)
        .returning(|_| Ok(TranscriptionStatus::Queued));
    transcriber
        .expect_start_job()
        .withf(|r| r.media_uri == "s3://video-summary-media/staging/keynote/2.mp4")
        .times(1)
        .returning(|_| Ok(TranscriptionStatus::Queued));
    let transcripts = TranscriptGenerator::new(Arc::new(transcriber), layout());
    let after_jobs = transcripts.handle(batch(after_clips)).await.unwrap();

    let job_0 = after_jobs.items[0].transcription_job_name.clone().unwrap();
    let job_2 = after_jobs.items[2].transcription_job_name.clone().unwrap();
    assert!(after_jobs.items[1].transcription_job_name.is_none());

    // First poll: job 0 done, job 2 still running
    let mut first_poll = MockTranscriber::new();
    let name = job_0.clone();
    first_poll
        .expect_job_status()
        .withf(move |n| n == name)
        .times(1)
        .returning(|_| Ok(TranscriptionStatus::Completed));
    let name = job_2.clone();
    first_poll
        .expect_job_status()
        .withf(move |n| n == name)
        .times(1)
        .returning(|_| Ok(TranscriptionStatus::InProgress));
    let polled = JobStatusChecker::new(Arc::new(first_poll))
        .handle(batch(wire(&after_jobs)))
        .await
        .unwrap();
    assert_eq!(polled.all_job_status, Some(AllJobStatus::InProgress));

    // Second poll: only job 2 is queried
    let mut second_poll = MockTranscriber::new();
    let name = job_2.clone();
    second_poll
        .expect_job_status()
        .withf(move |n| n == name)
        .times(1)
        .returning(|_| Ok(TranscriptionStatus::Completed));
    let polled = JobStatusChecker::new(Arc::new(second_poll))
        .handle(batch(wire(&polled)))
        .await
        .unwrap();
    assert_eq!(polled.all_job_status, Some(AllJobStatus::Completed));
    assert_eq!(wire(&polled)["AllJobStatus"], "COMPLETED");

    // Transcription service output
    for index in [0, 2] {
        let doc = json!({"results": {"transcripts": [{"transcript": format!("spoken words {}", index)}]}});
        store
            .insert(
                BUCKET,
                &format!("staging/keynote/{}.json", index),
                serde_json::to_vec(&doc).unwrap(),
            )
            .await;
    }

    // Summaries
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .times(2)
        .returning(|prompt| Ok(format!("Summary of: {}", prompt.lines().next().unwrap_or_default())));
    let summarized = Summarizer::new(store.clone(), Arc::new(generator), layout())
        .handle(batch(wire(&polled)))
        .await
        .unwrap();
    assert_eq!(summarized, polled);
    assert_eq!(
        store
            .download_bytes(BUCKET, "summaries/keynote/2.txt")
            .await
            .unwrap(),
        b"Summary of: spoken words 2"
    );
    assert!(store.get(BUCKET, "summaries/keynote/1.txt").await.is_none());

    // Report
    let report_input: ReportRequest = serde_json::from_value(json!({
        "Video": wire(summarized.video()),
        "Segments": wire(&summarized.items),
    }))
    .unwrap();
    let reported = ReportBuilder::new(
        store.clone(),
        table.clone(),
        layout(),
        Duration::from_secs(3600),
    )
    .handle(report_input)
    .await
    .unwrap();

    let pdf = store.get(BUCKET, "reports/keynote.pdf").await.unwrap();
    assert!(pdf.data.starts_with(b"%PDF"));

    let row = table.get_report("keynote.mp4").await.unwrap().unwrap();
    assert_eq!(Some(row.presigned_url.clone()), reported.report_file);
    assert_eq!(row.pdf_file_name(), "keynote.pdf");
    assert_eq!(
        wire(&reported)["ReportFile"],
        Value::String(row.presigned_url)
    );

    // No scratch files left behind
    assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);

    let presence_after: Vec<_> = summarized.items.iter().map(|s| s.presence).collect();
    assert_eq!(
        presence_after,
        vec![Some(AvPresence::Yes), Some(AvPresence::No), Some(AvPresence::Yes)]
    );
}
