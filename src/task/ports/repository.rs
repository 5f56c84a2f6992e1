//! Repository port for task persistence and filtered lookup.

use crate::{
    access,
    group::domain::GroupId,
    identity::domain::UserId,
    task::domain::{Task, TaskId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Selection applied by [`TaskRepository::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    /// Private tasks created by `actor` plus every task of `groups`.
    VisibleTo {
        /// Listing actor.
        actor: UserId,
        /// Groups the actor belongs to.
        groups: Vec<GroupId>,
    },
    /// Every task referencing one group.
    InGroup(GroupId),
}

impl TaskFilter {
    /// Returns `true` when `task` is selected by this filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::VisibleTo { actor, groups } => access::is_task_visible(*actor, task, groups),
            Self::InGroup(group) => task.group_id() == Some(*group),
        }
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces the stored snapshot of an existing task (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Deletes every task referencing `group`, returning how many went.
    async fn delete_by_group(&self, group: GroupId) -> TaskRepositoryResult<u64>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks selected by `filter`, newest first.
    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
