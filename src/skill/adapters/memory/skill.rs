//! In-memory repository for the skill catalog.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::skill::{
    domain::{Skill, SkillId, SkillName},
    ports::{SkillRepository, SkillRepositoryError, SkillRepositoryResult},
};

/// Thread-safe in-memory skill repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillRepository {
    state: Arc<RwLock<InMemorySkillState>>,
}

#[derive(Debug, Default)]
struct InMemorySkillState {
    skills: HashMap<SkillId, Skill>,
    name_index: HashMap<SkillName, SkillId>,
}

impl InMemorySkillRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> SkillRepositoryError {
    SkillRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.skills.contains_key(&skill.id()) {
            return Err(SkillRepositoryError::DuplicateSkill(skill.id()));
        }
        if state.name_index.contains_key(skill.name()) {
            return Err(SkillRepositoryError::DuplicateSkillName(
                skill.name().clone(),
            ));
        }

        state.name_index.insert(skill.name().clone(), skill.id());
        state.skills.insert(skill.id(), skill.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.skills.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[SkillId]) -> SkillRepositoryResult<Vec<Skill>> {
        let state = self.state.read().map_err(poisoned)?;
        let unique: BTreeSet<SkillId> = ids.iter().copied().collect();
        Ok(unique
            .into_iter()
            .filter_map(|id| state.skills.get(&id).cloned())
            .collect())
    }

    async fn list_all(&self) -> SkillRepositoryResult<Vec<Skill>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut skills: Vec<Skill> = state.skills.values().cloned().collect();
        skills.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(skills)
    }
}
