//! Lambda entry point: submit transcription jobs for usable clips.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_ml_client::TranscribeService;
use vsum_models::SegmentBatch;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{PipelineConfig, Prefix, TranscriptGenerator};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;
    let layout = config.artifact_layout(&[Prefix::Staging])?;

    let handler = TranscriptGenerator::new(
        Arc::new(TranscribeService::from_sdk_config(&sdk_config)),
        layout,
    );
    info!("generate-video-clip-transcripts ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<SegmentBatch>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
