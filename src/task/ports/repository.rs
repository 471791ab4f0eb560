//! Repository port for task tree persistence and lookup.

use crate::developer::domain::DeveloperId;
use crate::task::domain::{Task, TaskId, TaskTree};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores every node of a new tree, together with its skill links, as a
    /// single unit.
    ///
    /// Either all nodes become visible or none do. Subtask order within each
    /// parent is preserved for later reads.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when any node identifier
    /// already exists, or [`TaskRepositoryError::NotFound`] when the root
    /// names a parent that does not exist.
    async fn store_tree(&self, tree: &TaskTree) -> TaskRepositoryResult<()>;

    /// Replaces the mutable fields of an existing node: title, status,
    /// required skills, assignee, and the modification timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_node(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a single node by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Loads a node with its full descendant subtree.
    ///
    /// Returns `None` when the task does not exist.
    async fn load_subtree(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskTree>>;

    /// Lists the full trees of every top-level task, newest first.
    async fn list_top_level(&self) -> TaskRepositoryResult<Vec<TaskTree>>;

    /// Returns every node assigned to the developer, in creation order.
    async fn find_by_assignee(&self, developer: DeveloperId) -> TaskRepositoryResult<Vec<Task>>;
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

    /// Stored data could not be converted into a domain value.
    #[error("invalid persisted task data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a conversion failure for stored data.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }
}
