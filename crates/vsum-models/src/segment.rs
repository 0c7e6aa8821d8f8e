//! Segment records.
//!
//! One record per detected shot. Records arrive from the segmentation service
//! and every pipeline stage adds fields to them; fields this crate does not
//! model are carried through untouched in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Whether a clip carries both an audio and a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvPresence {
    Yes,
    No,
}

impl AvPresence {
    /// Presence derived from a clip's stream manifest.
    pub fn from_streams(has_audio: bool, has_video: bool) -> Self {
        if has_audio && has_video {
            AvPresence::Yes
        } else {
            AvPresence::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvPresence::Yes => "Yes",
            AvPresence::No => "No",
        }
    }
}

impl fmt::Display for AvPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transcription job status as reported by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranscriptionStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl TranscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionStatus::Queued => "QUEUED",
            TranscriptionStatus::InProgress => "IN_PROGRESS",
            TranscriptionStatus::Completed => "COMPLETED",
            TranscriptionStatus::Failed => "FAILED",
        }
    }

    /// Parse the service's status string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "QUEUED" => Some(TranscriptionStatus::Queued),
            "IN_PROGRESS" => Some(TranscriptionStatus::InProgress),
            "COMPLETED" => Some(TranscriptionStatus::Completed),
            "FAILED" => Some(TranscriptionStatus::Failed),
            _ => None,
        }
    }

    /// Job still waiting or running.
    pub fn is_pending(&self) -> bool {
        matches!(self, TranscriptionStatus::Queued | TranscriptionStatus::InProgress)
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for TranscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shot descriptor attached by the segmentation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSegment {
    #[serde(rename = "Index")]
    pub index: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single shot and everything the pipeline has learned about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "ShotSegment")]
    pub shot_segment: ShotSegment,

    #[serde(rename = "StartTimestampMillis", default)]
    pub start_millis: u64,

    #[serde(rename = "DurationMillis", default)]
    pub duration_millis: u64,

    /// Set once by the clip generator; absent until then.
    #[serde(
        rename = "AudioOrVideoExists",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub presence: Option<AvPresence>,

    #[serde(
        rename = "TranscriptionJobName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transcription_job_name: Option<String>,

    #[serde(
        rename = "TranscriptionJobStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transcription_job_status: Option<TranscriptionStatus>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SegmentRecord {
    /// Create a bare record (used by tests and tooling).
    pub fn new(index: u64, start_millis: u64, duration_millis: u64) -> Self {
        Self {
            shot_segment: ShotSegment {
                index,
                extra: Map::new(),
            },
            start_millis,
            duration_millis,
            presence: None,
            transcription_job_name: None,
            transcription_job_status: None,
            extra: Map::new(),
        }
    }

    pub fn index(&self) -> u64 {
        self.shot_segment.index
    }

    /// Start offset in seconds.
    pub fn start_secs(&self) -> f64 {
        self.start_millis as f64 / 1000.0
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_millis as f64 / 1000.0
    }

    /// Clip carries both audio and video; gates transcription and summarization.
    pub fn has_audio_and_video(&self) -> bool {
        self.presence == Some(AvPresence::Yes)
    }

    /// Clip known to lack audio or video.
    pub fn lacks_audio_or_video(&self) -> bool {
        self.presence == Some(AvPresence::No)
    }

    /// Recorded transcription status is still queued or running.
    pub fn is_transcription_pending(&self) -> bool {
        self.transcription_job_status
            .map(|s| s.is_pending())
            .unwrap_or(false)
    }

    /// Record a freshly started transcription job.
    pub fn record_transcription_job(&mut self, job_name: impl Into<String>, status: TranscriptionStatus) {
        self.transcription_job_name = Some(job_name.into());
        self.transcription_job_status = Some(status);
    }

    /// Record a polled status. A terminal status is never replaced.
    ///
    /// Returns `true` if the recorded status changed.
    pub fn update_transcription_status(&mut self, status: TranscriptionStatus) -> bool {
        match self.transcription_job_status {
            Some(current) if current.is_terminal() => false,
            Some(current) if current == status => false,
            _ => {
                self.transcription_job_status = Some(status);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_from_streams() {
        assert_eq!(AvPresence::from_streams(true, true), AvPresence::Yes);
        assert_eq!(AvPresence::from_streams(true, false), AvPresence::No);
        assert_eq!(AvPresence::from_streams(false, true), AvPresence::No);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TranscriptionStatus::parse("IN_PROGRESS"), Some(TranscriptionStatus::InProgress));
        assert_eq!(TranscriptionStatus::parse("in_progress"), None);
        assert!(TranscriptionStatus::Queued.is_pending());
        assert!(TranscriptionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "Type": "SHOT",
            "StartTimestampMillis": 1500,
            "EndTimestampMillis": 4000,
            "DurationMillis": 2500,
            "StartTimecodeSMPTE": "00:00:01:12",
            "ShotSegment": {"Index": 3, "Confidence": 99.1}
        });

        let mut segment: SegmentRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(segment.index(), 3);
        assert!((segment.start_secs() - 1.5).abs() < f64::EPSILON);
        assert!(segment.presence.is_none());

        segment.presence = Some(AvPresence::No);
        let out = serde_json::to_value(&segment).unwrap();
        assert_eq!(out["Type"], "SHOT");
        assert_eq!(out["EndTimestampMillis"], 4000);
        assert_eq!(out["ShotSegment"]["Confidence"], 99.1);
        assert_eq!(out["AudioOrVideoExists"], "No");
        assert!(out.get("TranscriptionJobName").is_none());
    }

    #[test]
    fn test_terminal_status_never_regresses() {
        let mut segment = SegmentRecord::new(0, 0, 1000);
        segment.record_transcription_job("job-0", TranscriptionStatus::Queued);

        assert!(segment.update_transcription_status(TranscriptionStatus::InProgress));
        assert!(segment.update_transcription_status(TranscriptionStatus::Completed));
        assert!(!segment.update_transcription_status(TranscriptionStatus::InProgress));
        assert_eq!(segment.transcription_job_status, Some(TranscriptionStatus::Completed));
    }
}
