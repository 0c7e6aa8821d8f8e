//! Batch records exchanged with the orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::segment::SegmentRecord;
use crate::video::VideoRef;

/// Aggregate transcription state written by the status checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllJobStatus {
    /// At least one job is still queued or running; poll again later.
    InProgress,
    /// Every job reached a terminal state.
    Completed,
}

impl AllJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllJobStatus::InProgress => "IN_PROGRESS",
            AllJobStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for AllJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared per-batch input supplied by the orchestrator's map step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    #[serde(rename = "Video")]
    pub video: VideoRef,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Segment batch threaded through clip, transcript, status and summary stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBatch {
    #[serde(rename = "BatchInput")]
    pub batch_input: BatchInput,

    #[serde(rename = "Items", default)]
    pub items: Vec<SegmentRecord>,

    #[serde(rename = "AllJobStatus", default, skip_serializing_if = "Option::is_none")]
    pub all_job_status: Option<AllJobStatus>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SegmentBatch {
    /// Create a batch for a video.
    pub fn new(video: VideoRef, items: Vec<SegmentRecord>) -> Self {
        Self {
            batch_input: BatchInput {
                video,
                extra: Map::new(),
            },
            items,
            all_job_status: None,
            extra: Map::new(),
        }
    }

    pub fn video(&self) -> &VideoRef {
        &self.batch_input.video
    }

    /// Segments whose clip carries both audio and video.
    pub fn segments_with_av(&self) -> impl Iterator<Item = &SegmentRecord> {
        self.items.iter().filter(|s| s.has_audio_and_video())
    }
}

/// Input of the report stage: the full segment list for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "Video")]
    pub video: VideoRef,

    #[serde(rename = "Segments", default)]
    pub segments: Vec<SegmentRecord>,

    /// Shareable report link, set once the report is published.
    #[serde(rename = "ReportFile", default, skip_serializing_if = "Option::is_none")]
    pub report_file: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
