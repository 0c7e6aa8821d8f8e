//! Object storage for pipeline artifacts.
//!
//! Handlers talk to the `ObjectStore` port; `S3Storage` is the production
//! implementation and `MemoryStore` backs tests.

pub mod client;
pub mod error;
pub mod memory;

pub use client::{ObjectStore, S3Storage};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;

/// Content type for MP4 clips.
pub const CONTENT_TYPE_MP4: &str = "video/mp4";
/// Content type for JPEG thumbnails.
pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";
/// Content type for plain-text summaries.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
/// Content type for rendered reports.
pub const CONTENT_TYPE_PDF: &str = "application/pdf";
