//! Repository port for skill catalog persistence and lookup.

use crate::skill::domain::{Skill, SkillId, SkillName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for skill repository operations.
pub type SkillRepositoryResult<T> = Result<T, SkillRepositoryError>;

/// Skill persistence contract.
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Stores a new skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillRepositoryError::DuplicateSkill`] when the identifier
    /// already exists or [`SkillRepositoryError::DuplicateSkillName`] when the
    /// name is already catalogued.
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()>;

    /// Finds a skill by identifier.
    ///
    /// Returns `None` when the skill does not exist.
    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>>;

    /// Returns every skill whose identifier appears in `ids`.
    ///
    /// Unknown identifiers are skipped; callers compare the result against
    /// their input to detect misses. Order is unspecified.
    async fn find_by_ids(&self, ids: &[SkillId]) -> SkillRepositoryResult<Vec<Skill>>;

    /// Returns all skills ordered by name ascending.
    async fn list_all(&self) -> SkillRepositoryResult<Vec<Skill>>;
}

/// Errors returned by skill repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SkillRepositoryError {
    /// A skill with the same identifier already exists.
    #[error("duplicate skill identifier: {0}")]
    DuplicateSkill(SkillId),

    /// A skill with the same name already exists.
    #[error("duplicate skill name: {0}")]
    DuplicateSkillName(SkillName),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SkillRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
