//! In-memory repository for developer roster tests.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::developer::{
    domain::{Developer, DeveloperId},
    ports::{DeveloperRepository, DeveloperRepositoryError, DeveloperRepositoryResult},
};

/// Thread-safe in-memory developer repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeveloperRepository {
    state: Arc<RwLock<HashMap<DeveloperId, Developer>>>,
}

impl InMemoryDeveloperRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> DeveloperRepositoryError {
    DeveloperRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DeveloperRepository for InMemoryDeveloperRepository {
    async fn store(&self, developer: &Developer) -> DeveloperRepositoryResult<()> {
        let mut developers = self.state.write().map_err(poisoned)?;
        if developers.contains_key(&developer.id()) {
            return Err(DeveloperRepositoryError::DuplicateDeveloper(developer.id()));
        }
        developers.insert(developer.id(), developer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DeveloperId) -> DeveloperRepositoryResult<Option<Developer>> {
        let developers = self.state.read().map_err(poisoned)?;
        Ok(developers.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[DeveloperId]) -> DeveloperRepositoryResult<Vec<Developer>> {
        let developers = self.state.read().map_err(poisoned)?;
        let unique: BTreeSet<DeveloperId> = ids.iter().copied().collect();
        Ok(unique
            .into_iter()
            .filter_map(|id| developers.get(&id).cloned())
            .collect())
    }

    async fn list_all(&self) -> DeveloperRepositoryResult<Vec<Developer>> {
        let developers = self.state.read().map_err(poisoned)?;
        let mut listed: Vec<Developer> = developers.values().cloned().collect();
        listed.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(listed)
    }
}
