//! Service layer for task creation, retrieval, update and deletion.

use crate::task::{
    domain::{Task, TaskId},
    dto::{TaskRequest, TaskResponse},
    mapper,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists for the requested identifier.
    #[error("Task not found with id: {0}")]
    NotFound(TaskId),

    /// The caller supplied a malformed argument.
    #[error("{0}")]
    InvalidInput(String),

    /// Storage failed; `message` is safe to show to clients.
    #[error("{message}")]
    Internal {
        /// Client-facing description of the failed operation.
        message: &'static str,
        /// Underlying repository failure, kept for server-side logging.
        #[source]
        source: TaskRepositoryError,
    },
}

impl TaskServiceError {
    fn internal(message: &'static str) -> impl FnOnce(TaskRepositoryError) -> Self {
        move |source| match source {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Internal {
                message,
                source: other,
            },
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

const RETRIEVE_FAILED: &str = "Failed to retrieve task due to database error";
const LIST_FAILED: &str = "Failed to retrieve tasks due to database error";
const CREATE_FAILED: &str = "Failed to create task due to database error";
const UPDATE_FAILED: &str = "Failed to update task due to database error";
const DELETE_FAILED: &str = "Failed to delete task due to database error";

/// Task orchestration service.
///
/// Each operation is one repository round trip (or a lookup followed by a
/// single mutation); repository `NotFound` raised by a concurrent delete is
/// reported as [`TaskServiceError::NotFound`].
///
/// No transaction spans the lookup and the mutation. Every mutation is a
/// single statement: an update returns the row it wrote and a delete
/// reports its affected row count, so a task removed in between surfaces
/// as `NotFound` instead of a silent no-op. Two concurrent updates of the
/// same task resolve as last writer wins.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidInput`] when `id` is not positive,
    /// [`TaskServiceError::NotFound`] when no task exists and
    /// [`TaskServiceError::Internal`] when storage fails.
    pub async fn get_task(&self, id: i64) -> TaskServiceResult<TaskResponse> {
        let task_id = parse_id(id)?;
        debug!(task_id = %task_id, "fetching task");
        let task = self.load(task_id, RETRIEVE_FAILED).await?;
        Ok(mapper::entity_to_response(&task))
    }

    /// Lists every task in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Internal`] when storage fails.
    pub async fn get_all_tasks(&self) -> TaskServiceResult<Vec<TaskResponse>> {
        let tasks = self
            .repository
            .find_all()
            .await
            .map_err(TaskServiceError::internal(LIST_FAILED))?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks.iter().map(mapper::entity_to_response).collect())
    }

    /// Creates a task from an already validated request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Internal`] when storage fails.
    pub async fn create_task(&self, request: TaskRequest) -> TaskServiceResult<TaskResponse> {
        let mut task = mapper::request_to_entity(request);
        task.mark_created(&*self.clock);
        let saved = self
            .repository
            .save(task)
            .await
            .map_err(TaskServiceError::internal(CREATE_FAILED))?;
        debug!(task_id = ?saved.id(), "created task");
        Ok(mapper::entity_to_response(&saved))
    }

    /// Applies the fields present in `request` to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidInput`] when `id` is not positive,
    /// [`TaskServiceError::NotFound`] when no task exists and
    /// [`TaskServiceError::Internal`] when storage fails.
    pub async fn update_task(
        &self,
        id: i64,
        request: TaskRequest,
    ) -> TaskServiceResult<TaskResponse> {
        let task_id = parse_id(id)?;
        let mut task = self.load(task_id, UPDATE_FAILED).await?;
        mapper::apply_request_to_entity(request, &mut task);
        let updated = self
            .repository
            .save(task)
            .await
            .map_err(TaskServiceError::internal(UPDATE_FAILED))?;
        debug!(task_id = %task_id, "updated task");
        Ok(mapper::entity_to_response(&updated))
    }

    /// Deletes an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidInput`] when `id` is not positive,
    /// [`TaskServiceError::NotFound`] when no task exists and
    /// [`TaskServiceError::Internal`] when storage fails.
    pub async fn delete_task(&self, id: i64) -> TaskServiceResult<()> {
        let task_id = parse_id(id)?;
        let task = self.load(task_id, DELETE_FAILED).await?;
        self.repository
            .delete(&task)
            .await
            .map_err(TaskServiceError::internal(DELETE_FAILED))?;
        debug!(task_id = %task_id, "deleted task");
        Ok(())
    }

    async fn load(&self, id: TaskId, failure: &'static str) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(TaskServiceError::internal(failure))?
            .ok_or(TaskServiceError::NotFound(id))
    }
}

fn parse_id(id: i64) -> TaskServiceResult<TaskId> {
    TaskId::new(id).map_err(|_| TaskServiceError::InvalidInput(format!("Invalid task ID: {id}")))
}
