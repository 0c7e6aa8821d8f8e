//! Lambda entry point: build and publish the summary report.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_models::ReportRequest;
use vsum_storage::S3Storage;
use vsum_table::DynamoReportTable;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{PipelineConfig, Prefix, ReportBuilder};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;
    let layout = config.artifact_layout(&[Prefix::Summary, Prefix::Report])?;

    let handler = ReportBuilder::new(
        Arc::new(S3Storage::from_sdk_config(&sdk_config)),
        Arc::new(DynamoReportTable::from_sdk_config(
            &sdk_config,
            config.table_name.clone(),
        )),
        layout,
        config.presigned_url_expiration,
    );
    info!(table = %config.table_name, "create-summary-report ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<ReportRequest>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
