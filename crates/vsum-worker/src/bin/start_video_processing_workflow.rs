//! Lambda entry point: start the processing workflow once segmentation completes.

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use vsum_models::NotificationEvent;
use vsum_worker::lambda::bootstrap;
use vsum_worker::{PipelineConfig, WorkflowLauncher};
use vsum_workflow::StepFunctionsStarter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let sdk_config = bootstrap().await;
    let config = PipelineConfig::from_env().context("loading pipeline configuration")?;

    let starter = StepFunctionsStarter::from_sdk_config(&sdk_config, config.state_machine_arn()?);
    let handler = WorkflowLauncher::new(Arc::new(starter));
    info!("start-video-processing-workflow ready");

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<NotificationEvent>| async move {
        handler.handle(event.payload).await.map_err(Error::from)
    }))
    .await
}
