//! Asynchronous tasks accepted by the management api.

use std::fmt;

use async_trait::async_trait;
use azurecdn_core::{Error, Result};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status of a server side task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// The service has not assigned a status yet.
    #[default]
    NotSet,
    /// The task is still running.
    Processing,
    /// The task finished successfully.
    Succeeded,
    /// The task failed.
    Failed,
}

impl TaskStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotSet => write!(f, "NotSet"),
            TaskStatus::Processing => write!(f, "Processing"),
            TaskStatus::Succeeded => write!(f, "Succeeded"),
            TaskStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Decode a status, treating `null` like a missing field.
fn status_or_not_set<'de, D>(d: D) -> std::result::Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TaskStatus>::deserialize(d)?.unwrap_or_default())
}

/// Tracking information of an accepted asynchronous call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AsyncInfo {
    pub task_track_id: String,
    #[serde(deserialize_with = "status_or_not_set")]
    pub task_status: TaskStatus,
}

/// Result of every call that the service may complete out of band.
///
/// Operations such as purge or delete return this directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TaskResponse {
    pub succeeded: bool,
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub async_info: Option<AsyncInfo>,
}

impl TaskResponse {
    /// The task track id, if the call was accepted asynchronously.
    pub fn task_track_id(&self) -> Option<&str> {
        if !self.is_async {
            return None;
        }
        self.async_info
            .as_ref()
            .map(|v| v.task_track_id.as_str())
            .filter(|v| !v.is_empty())
    }

    /// The status reported with the response.
    ///
    /// A synchronous success is reported as [`TaskStatus::Succeeded`]. An
    /// asynchronous call without tracking info is [`TaskStatus::NotSet`].
    pub fn status(&self) -> TaskStatus {
        if self.is_async {
            return self
                .async_info
                .as_ref()
                .map(|v| v.task_status)
                .unwrap_or_default();
        }

        if self.succeeded {
            TaskStatus::Succeeded
        } else {
            TaskStatus::NotSet
        }
    }

    /// Start tracking the task, `None` if there is nothing to track.
    pub fn tracker(&self, endpoint_id: &str) -> Option<TaskTracker> {
        TaskTracker::from_response(endpoint_id, self)
    }
}

/// Operation details returned by the operation status query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Operation {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Type")]
    pub operation_type: String,
    #[serde(deserialize_with = "status_or_not_set")]
    pub status: TaskStatus,
    /// Free form message, its shape depends on the operation type.
    pub message: Option<Value>,
    pub start: String,
    pub end: String,
    #[serde(rename = "EndpointID")]
    pub endpoint_id: String,
    #[serde(rename = "SubscriptionID")]
    pub subscription_id: String,
}

/// PollOperation queries the current status of an operation once.
#[async_trait]
pub trait PollOperation: Send + Sync {
    /// Fetch the operation.
    async fn poll_operation(&self, endpoint_id: &str, operation_id: &str) -> Result<Operation>;
}

/// TaskTracker follows one asynchronous task to a terminal status.
///
/// Every [`poll`](TaskTracker::poll) is a single observation. Waiting and
/// retry policy between polls is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskTracker {
    endpoint_id: String,
    task_id: String,
    status: TaskStatus,
}

impl TaskTracker {
    /// Track a task with unknown status.
    pub fn new(endpoint_id: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            task_id: task_id.into(),
            status: TaskStatus::NotSet,
        }
    }

    /// Track the task accepted by `resp`.
    ///
    /// Returns `None` if the call was not accepted asynchronously.
    pub fn from_response(endpoint_id: &str, resp: &TaskResponse) -> Option<Self> {
        let task_id = resp.task_track_id()?;
        Some(Self {
            endpoint_id: endpoint_id.to_string(),
            task_id: task_id.to_string(),
            status: resp.status(),
        })
    }

    pub fn endpoint_id(&self) -> &str {
        &self.endpoint_id
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Record an observed status.
    ///
    /// Leaving a terminal status is rejected with
    /// [`ErrorKind::InvalidTransition`](azurecdn_core::ErrorKind::InvalidTransition)
    /// and the tracked status stays unchanged.
    pub fn observe(&mut self, status: TaskStatus) -> Result<()> {
        if self.status.is_terminal() && status != self.status {
            return Err(Error::invalid_transition(format!(
                "task {} is {} and can't become {}",
                self.task_id, self.status, status
            )));
        }

        if status != self.status {
            debug!("task {} moved from {} to {}", self.task_id, self.status, status);
        }
        self.status = status;
        Ok(())
    }

    /// Query the operation once and record its status.
    ///
    /// A tracker already in a terminal status returns it without querying.
    pub async fn poll(&mut self, poller: &impl PollOperation) -> Result<TaskStatus> {
        if self.is_terminal() {
            return Ok(self.status);
        }

        let op = poller
            .poll_operation(&self.endpoint_id, &self.task_id)
            .await?;
        self.observe(op.status)?;
        Ok(self.status)
    }
}
