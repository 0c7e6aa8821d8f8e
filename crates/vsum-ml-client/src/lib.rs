//! Clients for the managed ML services the pipeline delegates to.
//!
//! - `SegmentDetector`: asynchronous shot segmentation (Rekognition)
//! - `TranscriptionService`: speech-to-text jobs (Transcribe)
//! - `TextGenerator`: prompt completion (Bedrock)
//!
//! Each service sits behind an async trait so handlers can be exercised
//! against mocks.

pub mod error;
pub mod generation;
pub mod segmentation;
pub mod transcription;

pub use error::{MlError, MlResult};
pub use generation::{BedrockTextGenerator, CompletionRequest, TextGenerator};
pub use segmentation::{NotificationTarget, RekognitionSegmentDetector, SegmentDetector};
pub use transcription::{
    new_job_name, TranscribeService, TranscriptionRequest, TranscriptionService,
    TRANSCRIPTION_JOB_PREFIX,
};
