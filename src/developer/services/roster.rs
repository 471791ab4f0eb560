//! Service layer for developer roster lookup and registration.

use crate::developer::{
    domain::{
        AssignedTaskSummary, Developer, DeveloperDomainError, DeveloperId, DeveloperName,
        DeveloperProfile,
    },
    ports::{DeveloperRepository, DeveloperRepositoryError},
};
use crate::skill::{
    domain::{Skill, SkillId},
    ports::{SkillRepository, SkillRepositoryError},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for developer roster operations.
#[derive(Debug, Error)]
pub enum DeveloperRosterError {
    /// No developer has the requested identifier.
    #[error("Developer with ID {0} not found")]
    NotFound(DeveloperId),
    /// A skill named at registration does not exist.
    #[error("Skill with ID {0} not found")]
    SkillNotFound(SkillId),
    /// Stored skill links refer to skills missing from the catalog.
    #[error("data consistency fault: developer or task references unknown skill {0}")]
    Consistency(SkillId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DeveloperDomainError),
    /// Developer repository operation failed.
    #[error(transparent)]
    Repository(#[from] DeveloperRepositoryError),
    /// Skill lookup failed.
    #[error(transparent)]
    SkillRepository(#[from] SkillRepositoryError),
    /// Assignment lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for developer roster service operations.
pub type DeveloperRosterResult<T> = Result<T, DeveloperRosterError>;

/// Developer roster orchestration service.
#[derive(Clone)]
pub struct DeveloperRosterService<D, S, T, C>
where
    D: DeveloperRepository,
    S: SkillRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    developers: Arc<D>,
    skills: Arc<S>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<D, S, T, C> DeveloperRosterService<D, S, T, C>
where
    D: DeveloperRepository,
    S: SkillRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new developer roster service.
    #[must_use]
    pub const fn new(developers: Arc<D>, skills: Arc<S>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            developers,
            skills,
            tasks,
            clock,
        }
    }

    /// Registers a developer holding the given skills.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperRosterError::Domain`] when the name is invalid or
    /// [`DeveloperRosterError::SkillNotFound`] when a skill does not exist.
    pub async fn register(
        &self,
        name: impl Into<String>,
        skill_ids: &[SkillId],
    ) -> DeveloperRosterResult<DeveloperProfile> {
        let developer_name = DeveloperName::new(name)?;
        let found: BTreeSet<SkillId> = self
            .skills
            .find_by_ids(skill_ids)
            .await?
            .iter()
            .map(Skill::id)
            .collect();
        if let Some(unknown) = skill_ids.iter().find(|id| !found.contains(id)) {
            return Err(DeveloperRosterError::SkillNotFound(*unknown));
        }

        let developer = Developer::new(developer_name, found, &*self.clock);
        self.developers.store(&developer).await?;
        tracing::debug!(
            developer_id = %developer.id(),
            name = %developer.name(),
            skills = developer.skill_ids().len(),
            "registered developer"
        );
        self.get_by_id(developer.id()).await
    }

    /// Returns every developer profile ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperRosterError`] when persistence lookup fails or a
    /// stored skill link no longer resolves.
    pub async fn list_all(&self) -> DeveloperRosterResult<Vec<DeveloperProfile>> {
        let developers = self.developers.list_all().await?;
        let mut profiles = Vec::with_capacity(developers.len());
        for developer in developers {
            profiles.push(self.profile(developer).await?);
        }
        Ok(profiles)
    }

    /// Retrieves a developer profile by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperRosterError::NotFound`] when no developer has the
    /// given identifier.
    pub async fn get_by_id(&self, id: DeveloperId) -> DeveloperRosterResult<DeveloperProfile> {
        let developer = self
            .developers
            .find_by_id(id)
            .await?
            .ok_or(DeveloperRosterError::NotFound(id))?;
        self.profile(developer).await
    }

    async fn profile(&self, developer: Developer) -> DeveloperRosterResult<DeveloperProfile> {
        let assigned = self.tasks.find_by_assignee(developer.id()).await?;

        let mut wanted: BTreeSet<SkillId> = developer.skill_ids().clone();
        for task in &assigned {
            wanted.extend(task.required_skill_ids().iter().copied());
        }
        let lookup: Vec<SkillId> = wanted.into_iter().collect();
        let catalog: HashMap<SkillId, Skill> = self
            .skills
            .find_by_ids(&lookup)
            .await?
            .into_iter()
            .map(|skill| (skill.id(), skill))
            .collect();

        let assigned_tasks = assigned
            .into_iter()
            .map(|task| {
                Ok(AssignedTaskSummary {
                    id: task.id(),
                    title: task.title().clone(),
                    status: task.status(),
                    required_skills: sorted_skills(&catalog, task.required_skill_ids())?,
                })
            })
            .collect::<DeveloperRosterResult<Vec<_>>>()?;
        let skills = sorted_skills(&catalog, developer.skill_ids())?;

        Ok(DeveloperProfile {
            developer,
            skills,
            assigned_tasks,
        })
    }
}

fn sorted_skills(
    catalog: &HashMap<SkillId, Skill>,
    ids: &BTreeSet<SkillId>,
) -> DeveloperRosterResult<Vec<Skill>> {
    let mut skills = ids
        .iter()
        .map(|id| {
            catalog
                .get(id)
                .cloned()
                .ok_or(DeveloperRosterError::Consistency(*id))
        })
        .collect::<DeveloperRosterResult<Vec<_>>>()?;
    skills.sort_by(|left, right| left.name().cmp(right.name()));
    Ok(skills)
}
