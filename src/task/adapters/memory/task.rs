//! In-memory task repository for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are handed out from a sequence starting at 1, so iteration
/// order matches insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskState {
    fn next_id(&mut self) -> TaskRepositoryResult<TaskId> {
        let candidate = self.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task id sequence exhausted"))
        })?;
        let id = TaskId::new(candidate).map_err(TaskRepositoryError::persistence)?;
        self.last_id = candidate;
        Ok(id)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn insert_new(state: &mut InMemoryTaskState, task: Task) -> TaskRepositoryResult<Task> {
    let id = state.next_id()?;
    let stored = Task::from_persisted(PersistedTaskData {
        id,
        created_at: task.created_at().unwrap_or_else(Utc::now),
        title: task.title().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status(),
    });
    state.tasks.insert(id, stored.clone());
    Ok(stored)
}

fn replace_existing(
    state: &mut InMemoryTaskState,
    id: TaskId,
    task: &Task,
) -> TaskRepositoryResult<Task> {
    let existing = state
        .tasks
        .get_mut(&id)
        .ok_or(TaskRepositoryError::NotFound(id))?;

    // Only the mutable columns are written; the stored creation time wins.
    existing.set_title(task.title());
    if let Some(description) = task.description() {
        existing.set_description(description);
    }
    existing.set_status(task.status());
    Ok(existing.clone())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn save(&self, task: Task) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        match task.id() {
            None => insert_new(&mut state, task),
            Some(id) => replace_existing(&mut state, id, &task),
        }
    }

    async fn delete(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id().ok_or(TaskRepositoryError::Unsaved)?;
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
