//! Workflow error types.

use thiserror::Error;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to start execution of {state_machine}: {message}")]
    StartFailed {
        state_machine: String,
        message: String,
    },
}

impl WorkflowError {
    pub fn start_failed(state_machine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StartFailed {
            state_machine: state_machine.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_state_machine() {
        let err = WorkflowError::start_failed("arn:aws:states:us-east-1:1:stateMachine:vp", "throttled");
        let msg = err.to_string();
        assert!(msg.contains("stateMachine:vp"));
        assert!(msg.contains("throttled"));
    }
}
