//! Shared data models for the video summary pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - The segment batch record threaded between pipeline stages
//! - Segment records, presence flags and transcription statuses
//! - Deterministic artifact key derivation
//! - Trigger events (object-store upload, segmentation notification)
//! - Report table rows and transcript documents

pub mod batch;
pub mod error;
pub mod events;
pub mod paths;
pub mod report;
pub mod segment;
pub mod transcript;
pub mod video;

// Re-export common types
pub use batch::{AllJobStatus, BatchInput, ReportRequest, SegmentBatch};
pub use error::{ModelError, ModelResult};
pub use events::{NotificationEvent, NotificationRecord, UploadEvent, UploadRecord};
pub use paths::ArtifactLayout;
pub use report::ReportRecord;
pub use segment::{AvPresence, SegmentRecord, ShotSegment, TranscriptionStatus};
pub use transcript::TranscriptDocument;
pub use video::{S3Object, VideoRef};
