//! Lambda entry point: cut clips, probe them and extract thumbnails.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_media::FfmpegToolkit;
use vsum_models::SegmentBatch;
use vsum_storage::S3Storage;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{ClipGenerator, PipelineConfig, Prefix};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;
    let layout = config.artifact_layout(&[Prefix::Staging, Prefix::Summary])?;

    let media = FfmpegToolkit::from_env().context("locating ffmpeg and ffprobe")?;
    info!("Using {:?}", media.binaries());

    let handler = ClipGenerator::new(
        Arc::new(S3Storage::from_sdk_config(&sdk_config)),
        Arc::new(media),
        layout,
        config.work_dir.clone(),
    );
    info!("generate-video-segments ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<SegmentBatch>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
