//! Repository port for developer persistence and lookup.

use crate::developer::domain::{Developer, DeveloperId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for developer repository operations.
pub type DeveloperRepositoryResult<T> = Result<T, DeveloperRepositoryError>;

/// Developer persistence contract.
#[async_trait]
pub trait DeveloperRepository: Send + Sync {
    /// Stores a new developer together with their skill links.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperRepositoryError::DuplicateDeveloper`] when the
    /// identifier already exists.
    async fn store(&self, developer: &Developer) -> DeveloperRepositoryResult<()>;

    /// Finds a developer by identifier.
    ///
    /// Returns `None` when the developer does not exist.
    async fn find_by_id(&self, id: DeveloperId) -> DeveloperRepositoryResult<Option<Developer>>;

    /// Returns every developer whose identifier appears in `ids`.
    ///
    /// Unknown identifiers are skipped. Order is unspecified.
    async fn find_by_ids(&self, ids: &[DeveloperId]) -> DeveloperRepositoryResult<Vec<Developer>>;

    /// Returns all developers ordered by name ascending.
    async fn list_all(&self) -> DeveloperRepositoryResult<Vec<Developer>>;
}

/// Errors returned by developer repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DeveloperRepositoryError {
    /// A developer with the same identifier already exists.
    #[error("duplicate developer identifier: {0}")]
    DuplicateDeveloper(DeveloperId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeveloperRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
