//! Lambda entry point: refresh transcription job statuses.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_ml_client::TranscribeService;
use vsum_models::SegmentBatch;
use vsum_worker::lambda::bootstrap;
use vsum_worker::JobStatusChecker;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;

    let handler = JobStatusChecker::new(Arc::new(TranscribeService::from_sdk_config(&sdk_config)));
    info!("check-transcription-jobs ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<SegmentBatch>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
