//! Domain model for task records.
//!
//! The task domain holds the record shape, its status enumeration and the
//! identifier type, keeping infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskStatus};
