//! In-process report table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vsum_models::ReportRecord;

use crate::error::TableResult;
use crate::ReportTable;

/// `ReportTable` kept in a sorted map, for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryReportTable {
    rows: RwLock<BTreeMap<String, ReportRecord>>,
}

impl MemoryReportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = ReportRecord>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| (r.file_name.clone(), r))
            .collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ReportTable for MemoryReportTable {
    async fn put_report(&self, record: &ReportRecord) -> TableResult<()> {
        self.rows
            .write()
            .await
            .insert(record.file_name.clone(), record.clone());
        Ok(())
    }

    async fn list_reports(&self) -> TableResult<Vec<ReportRecord>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn get_report(&self, file_name: &str) -> TableResult<Option<ReportRecord>> {
        Ok(self.rows.read().await.get(file_name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_is_upsert() {
        let table = MemoryReportTable::new();
        table
            .put_report(&ReportRecord::new("talk.mp4", "old"))
            .await
            .unwrap();
        table
            .put_report(&ReportRecord::new("talk.mp4", "new"))
            .await
            .unwrap();

        let rows = table.list_reports().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].presigned_url, "new");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let table = MemoryReportTable::with_rows([ReportRecord::new("a.mp4", "u")]);
        assert!(table.get_report("b.mp4").await.unwrap().is_none());
        assert!(table.get_report("a.mp4").await.unwrap().is_some());
    }
}
