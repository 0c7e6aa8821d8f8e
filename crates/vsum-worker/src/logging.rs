//! Structured batch logging utilities.
//!
//! Provides consistent, structured logging for stage handlers with
//! tracing spans and contextual information.

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global subscriber.
///
/// JSON output unless `LOG_FORMAT` says otherwise, since CloudWatch indexes
/// JSON fields. Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() != "text")
        .unwrap_or(true);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_current_span(true).without_time())
            .with(env_filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init()
    };

    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Logger for one handler invocation over one video.
///
/// Every line carries the video and the handler operation so a batch can be
/// followed across stages.
#[derive(Debug, Clone)]
pub struct BatchLogger {
    video: String,
    operation: String,
}

impl BatchLogger {
    /// Create a new logger.
    ///
    /// # Arguments
    /// * `video` - Source video, usually `bucket/key`
    /// * `operation` - Handler name (e.g., "generate_video_segments")
    pub fn new(video: impl Into<String>, operation: &str) -> Self {
        Self {
            video: video.into(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            video = %self.video,
            operation = %self.operation,
            "Batch started: {}", message
        );
    }

    /// Log progress on one segment.
    pub fn log_segment(&self, index: u64, message: &str) {
        info!(
            video = %self.video,
            operation = %self.operation,
            segment = index,
            "Segment {}: {}", index, message
        );
    }

    /// Log a segment that was passed over.
    pub fn log_skip(&self, index: u64, reason: &str) {
        info!(
            video = %self.video,
            operation = %self.operation,
            segment = index,
            "Segment {} skipped: {}", index, reason
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            video = %self.video,
            operation = %self.operation,
            "Batch warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            video = %self.video,
            operation = %self.operation,
            "Batch error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            video = %self.video,
            operation = %self.operation,
            "Batch completed: {}", message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        BatchLogger::new("media/talk.mp4", "summarize_video_clips").log_start("2 segments");
    }
}
