//! Segmentation notification -> state machine execution.

use std::sync::Arc;

use tracing::{error, info};
use vsum_models::NotificationEvent;
use vsum_workflow::WorkflowStarter;

use crate::error::WorkerResult;

/// Starts one processing execution per segmentation-complete message.
pub struct WorkflowLauncher {
    starter: Arc<dyn WorkflowStarter>,
}

impl WorkflowLauncher {
    pub fn new(starter: Arc<dyn WorkflowStarter>) -> Self {
        Self { starter }
    }

    /// The message body is handed to the state machine untouched.
    /// Returns the execution ARNs, in record order.
    pub async fn handle(&self, event: NotificationEvent) -> WorkerResult<Vec<String>> {
        event.ensure_records()?;

        let mut executions = Vec::with_capacity(event.records.len());
        for record in &event.records {
            let message_id = record.sns.message_id.as_deref().unwrap_or("-");
            match self.starter.start_execution(&record.sns.message).await {
                Ok(arn) => {
                    info!(message_id, execution = %arn, "Started video processing workflow");
                    executions.push(arn);
                }
                Err(e) => {
                    error!(message_id, "Failed to start video processing workflow: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(executions)
    }
}
