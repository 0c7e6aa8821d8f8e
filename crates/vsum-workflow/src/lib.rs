//! Orchestrator executions.
//!
//! The state machine itself is provisioned outside this repository; this
//! crate only starts executions of it.

pub mod error;

pub use error::{WorkflowError, WorkflowResult};

use async_trait::async_trait;
use aws_sdk_sfn::Client;
use tracing::info;

/// Starts executions of the video processing state machine.
#[async_trait]
pub trait WorkflowStarter: Send + Sync {
    /// Start one execution with a raw JSON input; returns the execution ARN.
    async fn start_execution(&self, input: &str) -> WorkflowResult<String>;
}

/// `WorkflowStarter` backed by AWS Step Functions.
#[derive(Clone)]
pub struct StepFunctionsStarter {
    client: Client,
    state_machine_arn: String,
}

impl StepFunctionsStarter {
    pub fn new(client: Client, state_machine_arn: impl Into<String>) -> Self {
        Self {
            client,
            state_machine_arn: state_machine_arn.into(),
        }
    }

    pub fn from_sdk_config(
        config: &aws_config::SdkConfig,
        state_machine_arn: impl Into<String>,
    ) -> Self {
        Self::new(Client::new(config), state_machine_arn)
    }
}

#[async_trait]
impl WorkflowStarter for StepFunctionsStarter {
    async fn start_execution(&self, input: &str) -> WorkflowResult<String> {
        let response = self
            .client
            .start_execution()
            .state_machine_arn(&self.state_machine_arn)
            .input(input)
            .send()
            .await
            .map_err(|e| WorkflowError::start_failed(&self.state_machine_arn, e.to_string()))?;

        let execution_arn = response.execution_arn().to_string();
        info!("Started execution {}", execution_arn);
        Ok(execution_arn)
    }
}
