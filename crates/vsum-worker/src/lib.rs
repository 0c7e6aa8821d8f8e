//! Pipeline stage handlers.
//!
//! Every stage of the video summary pipeline is a standalone handler invoked
//! by the orchestrator with a JSON payload:
//!
//! 1. `SegmentDetectionStarter` - upload event -> shot segmentation job
//! 2. `WorkflowLauncher` - segmentation notification -> state machine execution
//! 3. `ClipGenerator` - cut clips, probe streams, extract thumbnails
//! 4. `TranscriptGenerator` - one transcription job per usable clip
//! 5. `JobStatusChecker` - aggregate transcription status for the poll loop
//! 6. `Summarizer` - summarize each transcript with a language model
//! 7. `ReportBuilder` - assemble, publish and register the PDF report
//!
//! Handlers receive their service clients as `Arc<dyn Port>` handles; the
//! binaries under `src/bin` wire the AWS implementations in.

pub mod config;
pub mod error;
pub mod handlers;
pub mod lambda;
pub mod logging;
pub mod report_document;

pub use config::{PipelineConfig, Prefix};
pub use error::{WorkerError, WorkerResult};
pub use handlers::{
    ClipGenerator, JobStatusChecker, ReportBuilder, SegmentDetectionStarter, Summarizer,
    TranscriptGenerator, WorkflowLauncher,
};
pub use logging::{init_tracing, BatchLogger};
pub use report_document::ReportDocument;
