//! Lambda entry point: start shot segmentation for uploaded videos.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_ml_client::{NotificationTarget, RekognitionSegmentDetector};
use vsum_models::UploadEvent;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{PipelineConfig, SegmentDetectionStarter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;

    let notification = NotificationTarget {
        topic_arn: config.sns_topic_arn()?.to_string(),
        role_arn: config.rekognition_role_arn()?.to_string(),
    };
    let detector = RekognitionSegmentDetector::from_sdk_config(&sdk_config, notification);
    let handler = SegmentDetectionStarter::new(Arc::new(detector));
    info!("start-segment-detection ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<UploadEvent>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
