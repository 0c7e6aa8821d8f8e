//! FFmpeg CLI wrapper for the clip stage.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Stream-copy trimming of a time range into a standalone clip
//! - Stream manifest probing via FFprobe
//! - Single-frame thumbnail extraction
//! - The `MediaToolkit` port the pipeline handlers depend on

pub mod clip;
pub mod command;
pub mod error;
pub mod probe;
pub mod thumbnail;
pub mod toolkit;

pub use clip::trim_segment;
pub use command::{FfmpegBinaries, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::{probe_streams, StreamManifest};
pub use thumbnail::extract_thumbnail;
pub use toolkit::{FfmpegToolkit, MediaToolkit};
