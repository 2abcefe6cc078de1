//! Wire-level request and response shapes for tasks.

use super::domain::TaskStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for creating or updating a task.
///
/// Every field is optional at the type level so that updates can be
/// partial: an absent field leaves the stored value untouched. Creation
/// requires `title` and `status`; the HTTP boundary enforces this before a
/// request reaches the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Task title.
    pub title: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Task status.
    pub status: Option<TaskStatus>,
}

impl TaskRequest {
    /// Creates a request carrying the fields required for creation.
    #[must_use]
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            status: Some(status),
        }
    }

    /// Creates a request that changes only the status.
    #[must_use]
    pub const fn status_only(status: TaskStatus) -> Self {
        Self {
            title: None,
            description: None,
            status: Some(status),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Read-only projection of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier; `None` only for a task that was never saved.
    pub id: Option<i64>,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Task status.
    pub status: TaskStatus,
    /// Creation timestamp; `None` only for a task that was never saved.
    pub created_at: Option<DateTime<Utc>>,
}
