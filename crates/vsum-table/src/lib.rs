//! Key-value table of generated reports.
//!
//! One row per processed video (`fileName` -> `pre-signedURL`), written by the
//! report stage and read by the lookup UI.

pub mod dynamo;
pub mod error;
pub mod memory;

pub use dynamo::DynamoReportTable;
pub use error::{TableError, TableResult};
pub use memory::MemoryReportTable;

use async_trait::async_trait;
use vsum_models::ReportRecord;

/// Default table name when `VIDEO_SUMMARY_TABLE` is unset.
pub const DEFAULT_TABLE_NAME: &str = "VideoSummaryTable";

/// Attribute holding the partition key.
pub const FILE_NAME_ATTR: &str = "fileName";
/// Attribute holding the report link.
pub const PRESIGNED_URL_ATTR: &str = "pre-signedURL";

/// Storage for report rows.
#[async_trait]
pub trait ReportTable: Send + Sync {
    /// Insert or replace the row for `record.file_name`.
    async fn put_report(&self, record: &ReportRecord) -> TableResult<()>;

    /// Every row, in table order.
    async fn list_reports(&self) -> TableResult<Vec<ReportRecord>>;

    async fn get_report(&self, file_name: &str) -> TableResult<Option<ReportRecord>>;
}
