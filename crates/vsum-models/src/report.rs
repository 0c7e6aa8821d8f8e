//! Report table rows.

use serde::{Deserialize, Serialize};

/// One row per processed video, keyed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "pre-signedURL")]
    pub presigned_url: String,
}

impl ReportRecord {
    pub fn new(file_name: impl Into<String>, presigned_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into().trim().to_string(),
            presigned_url: presigned_url.into(),
        }
    }

    /// Download label shown next to the link (`talk.mp4` -> `talk.pdf`).
    pub fn pdf_file_name(&self) -> String {
        let stem = self.file_name.split('.').next().unwrap_or_default();
        format!("{}.pdf", stem)
    }
}
