//! Assemble, publish and register the PDF summary report.

use std::sync::Arc;
use std::time::Duration;

use vsum_models::{ArtifactLayout, ReportRecord, ReportRequest};
use vsum_storage::{ObjectStore, CONTENT_TYPE_PDF};
use vsum_table::ReportTable;

use super::video_label;
use crate::error::WorkerResult;
use crate::logging::BatchLogger;
use crate::report_document::ReportDocument;

const OPERATION: &str = "create_summary_report";

/// Builds one report per video from the stored thumbnails and summaries.
///
/// A segment whose thumbnail or summary cannot be fetched, or whose
/// thumbnail cannot be decoded, contributes no block; the report is still
/// produced from the rest.
pub struct ReportBuilder {
    store: Arc<dyn ObjectStore>,
    table: Arc<dyn ReportTable>,
    layout: ArtifactLayout,
    link_lifetime: Duration,
}

impl ReportBuilder {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        table: Arc<dyn ReportTable>,
        layout: ArtifactLayout,
        link_lifetime: Duration,
    ) -> Self {
        Self {
            store,
            table,
            layout,
            link_lifetime,
        }
    }

    pub async fn handle(&self, request: ReportRequest) -> WorkerResult<ReportRequest> {
        let logger = BatchLogger::new(video_label(&request.video), OPERATION);
        logger.log_start(&format!("{} segments", request.segments.len()));

        match self.build(request, &logger).await {
            Ok(request) => Ok(request),
            Err(e) => {
                logger.log_error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn build(
        &self,
        mut request: ReportRequest,
        logger: &BatchLogger,
    ) -> WorkerResult<ReportRequest> {
        let video = request.video.clone();
        let bucket = video.bucket();
        let file_name = video.file_name()?;
        let video_name = video.video_name()?;

        let mut fetched = Vec::with_capacity(request.segments.len());
        for segment in &request.segments {
            let index = segment.index();
            match self.fetch_artifacts(bucket, video_name, index).await {
                Ok((thumbnail, summary)) => fetched.push((index, thumbnail, summary)),
                Err(e) => logger.log_skip(index, &e.to_string()),
            }
        }

        let (blocks, pdf) = {
            let mut report = ReportDocument::new();
            for (index, thumbnail, summary) in &fetched {
                match report.add_block(thumbnail, &String::from_utf8_lossy(summary)) {
                    Ok(()) => logger.log_segment(*index, "added to report"),
                    Err(e) => logger.log_skip(*index, &e.to_string()),
                }
            }
            (report.block_count(), report.render()?)
        };
        let report_key = self.layout.report_key(video_name);
        self.store
            .upload_bytes(bucket, &report_key, pdf, CONTENT_TYPE_PDF)
            .await?;

        let link = self
            .store
            .presign_get(bucket, &report_key, self.link_lifetime)
            .await?;
        self.table
            .put_report(&ReportRecord::new(file_name, link.clone()))
            .await?;

        logger.log_completion(&format!(
            "{} blocks, report at s3://{}/{}",
            blocks, bucket, report_key
        ));
        request.report_file = Some(link);
        Ok(request)
    }

    /// Thumbnail and summary of one segment.
    async fn fetch_artifacts(
        &self,
        bucket: &str,
        video_name: &str,
        index: u64,
    ) -> WorkerResult<(Vec<u8>, Vec<u8>)> {
        let thumbnail = self
            .store
            .download_bytes(bucket, &self.layout.thumbnail_key(video_name, index))
            .await?;
        let summary = self
            .store
            .download_bytes(bucket, &self.layout.summary_key(video_name, index))
            .await?;
        Ok((thumbnail, summary))
    }
}
