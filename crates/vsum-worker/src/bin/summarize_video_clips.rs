//! Lambda entry point: summarize clip transcripts.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_ml_client::BedrockTextGenerator;
use vsum_models::SegmentBatch;
use vsum_storage::S3Storage;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{PipelineConfig, Prefix, Summarizer};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;
    let layout = config.artifact_layout(&[Prefix::Staging, Prefix::Summary])?;
    let model_id = config.bedrock_model_id()?;

    let handler = Summarizer::new(
        Arc::new(S3Storage::from_sdk_config(&sdk_config)),
        Arc::new(BedrockTextGenerator::from_sdk_config(&sdk_config, model_id)),
        layout,
    );
    info!(model_id, "summarize-video-clips ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<SegmentBatch>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
