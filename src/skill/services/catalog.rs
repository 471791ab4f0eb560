//! Service layer for skill catalog lookup and registration.

use crate::skill::{
    domain::{Skill, SkillDomainError, SkillId, SkillName},
    ports::{SkillRepository, SkillRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for skill catalog operations.
#[derive(Debug, Error)]
pub enum SkillCatalogError {
    /// No skill has the requested identifier.
    #[error("Skill with ID {0} not found")]
    NotFound(SkillId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SkillDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SkillRepositoryError),
}

/// Result type for skill catalog service operations.
pub type SkillCatalogResult<T> = Result<T, SkillCatalogError>;

/// Skill catalog orchestration service.
#[derive(Clone)]
pub struct SkillCatalogService<R, C>
where
    R: SkillRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SkillCatalogService<R, C>
where
    R: SkillRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new skill catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new skill under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillCatalogError::Domain`] when the name is invalid or
    /// [`SkillCatalogError::Repository`] when the name is already taken.
    pub async fn register(&self, name: impl Into<String>) -> SkillCatalogResult<Skill> {
        let skill = Skill::new(SkillName::new(name)?, &*self.clock);
        self.repository.store(&skill).await?;
        tracing::debug!(skill_id = %skill.id(), name = %skill.name(), "registered skill");
        Ok(skill)
    }

    /// Returns every skill ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`SkillCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> SkillCatalogResult<Vec<Skill>> {
        Ok(self.repository.list_all().await?)
    }

    /// Retrieves a skill by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SkillCatalogError::NotFound`] when no skill has the given
    /// identifier.
    pub async fn get_by_id(&self, id: SkillId) -> SkillCatalogResult<Skill> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SkillCatalogError::NotFound(id))
    }

    /// Resolves skill names to catalogued skills, ignoring case.
    ///
    /// Names without a catalog entry are dropped. The result follows the
    /// order of `names` and contains each skill at most once.
    ///
    /// # Errors
    ///
    /// Returns [`SkillCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_names(&self, names: &[String]) -> SkillCatalogResult<Vec<Skill>> {
        let catalog = self.repository.list_all().await?;
        let mut matched: Vec<Skill> = Vec::new();
        for name in names {
            let wanted = name.trim().to_lowercase();
            let hit = catalog
                .iter()
                .find(|skill| skill.name().as_str().to_lowercase() == wanted);
            if let Some(skill) = hit
                && !matched.iter().any(|known| known.id() == skill.id())
            {
                matched.push(skill.clone());
            }
        }
        Ok(matched)
    }
}
