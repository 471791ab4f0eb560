//! Developer aggregate and its populated roster view.

use super::{DeveloperId, DeveloperName};
use crate::skill::domain::{Skill, SkillId};
use crate::task::domain::{TaskId, TaskStatus, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A developer and the skills they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Developer {
    id: DeveloperId,
    name: DeveloperName,
    skill_ids: BTreeSet<SkillId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted developer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDeveloperData {
    /// Persisted developer identifier.
    pub id: DeveloperId,
    /// Persisted display name.
    pub name: DeveloperName,
    /// Persisted skill links.
    pub skill_ids: BTreeSet<SkillId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Developer {
    /// Creates a new developer holding the given skills.
    #[must_use]
    pub fn new(
        name: DeveloperName,
        skill_ids: impl IntoIterator<Item = SkillId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: DeveloperId::new(),
            name,
            skill_ids: skill_ids.into_iter().collect(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a developer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDeveloperData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            skill_ids: data.skill_ids,
            created_at: data.created_at,
        }
    }

    /// Returns the developer identifier.
    #[must_use]
    pub const fn id(&self) -> DeveloperId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &DeveloperName {
        &self.name
    }

    /// Returns the identifiers of every skill the developer holds.
    #[must_use]
    pub const fn skill_ids(&self) -> &BTreeSet<SkillId> {
        &self.skill_ids
    }

    /// Returns whether the developer holds the given skill.
    #[must_use]
    pub fn has_skill(&self, skill_id: SkillId) -> bool {
        self.skill_ids.contains(&skill_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Compact view of a task currently assigned to a developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedTaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: TaskTitle,
    /// Current task status.
    pub status: TaskStatus,
    /// Skills the task requires, ordered by name.
    pub required_skills: Vec<Skill>,
}

/// Developer with skills and current assignments populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperProfile {
    /// The developer record.
    pub developer: Developer,
    /// Skills held by the developer, ordered by name.
    pub skills: Vec<Skill>,
    /// Tasks currently assigned to the developer.
    pub assigned_tasks: Vec<AssignedTaskSummary>,
}
