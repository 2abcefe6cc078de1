//! Conversions between task wire shapes and the task entity.

use super::{
    domain::Task,
    dto::{TaskRequest, TaskResponse},
};

/// Projects a task onto its response shape.
#[must_use]
pub fn entity_to_response(task: &Task) -> TaskResponse {
    TaskResponse {
        id: task.id().map(i64::from),
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status(),
        created_at: task.created_at(),
    }
}

/// Builds a new unsaved task from a request.
///
/// Identifier and creation time stay unset. A missing title becomes empty
/// and a missing status becomes the default status.
#[must_use]
pub fn request_to_entity(request: TaskRequest) -> Task {
    let TaskRequest {
        title,
        description,
        status,
    } = request;
    Task::new(title.unwrap_or_default(), description, status.unwrap_or_default())
}

/// Applies the fields present in `request` to `task`, leaving the rest as
/// they are.
pub fn apply_request_to_entity(request: TaskRequest, task: &mut Task) {
    if let Some(title) = request.title {
        task.set_title(title);
    }
    if let Some(description) = request.description {
        task.set_description(description);
    }
    if let Some(status) = request.status {
        task.set_status(status);
    }
}
