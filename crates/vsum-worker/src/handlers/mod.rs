//! Stage handlers, one per pipeline step.

pub mod clip_generator;
pub mod job_status_checker;
pub mod report_builder;
pub mod segment_detector;
pub mod summarizer;
pub mod transcript_generator;
pub mod workflow_starter;

pub use clip_generator::ClipGenerator;
pub use job_status_checker::JobStatusChecker;
pub use report_builder::ReportBuilder;
pub use segment_detector::SegmentDetectionStarter;
pub use summarizer::Summarizer;
pub use transcript_generator::TranscriptGenerator;
pub use workflow_starter::WorkflowLauncher;

use vsum_models::VideoRef;

/// `bucket/key` label used in log lines.
pub(crate) fn video_label(video: &VideoRef) -> String {
    format!("{}/{}", video.bucket(), video.key())
}
