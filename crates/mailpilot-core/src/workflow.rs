use crate::WorkflowError;
use serde::{Deserialize, Serialize};

/// Lifecycle of one workflow's remote call.
///
/// Only one request may be outstanding at a time, so responses are always
/// applied in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum WorkflowStatus {
    #[default]
    Idle,
    InFlight,
    Ready,
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Request,
    Succeed,
    Fail(String),
}

impl WorkflowStatus {
    pub fn transition(&self, event: StatusEvent) -> Result<WorkflowStatus, WorkflowError> {
        match (self, event) {
            (WorkflowStatus::InFlight, StatusEvent::Request) => Err(WorkflowError::AlreadyInFlight),
            (_, StatusEvent::Request) => Ok(WorkflowStatus::InFlight),
            (WorkflowStatus::InFlight, StatusEvent::Succeed) => Ok(WorkflowStatus::Ready),
            (WorkflowStatus::InFlight, StatusEvent::Fail(message)) => {
                Ok(WorkflowStatus::Failed { message })
            }
            (_, StatusEvent::Succeed | StatusEvent::Fail(_)) => Err(WorkflowError::NothingInFlight),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, WorkflowStatus::InFlight)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WorkflowStatus::Failed { message } => Some(message),
            _ => None,
        }
    }
}
