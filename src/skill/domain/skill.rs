//! Skill catalog entry.

use super::{SkillId, SkillName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named capability that tasks require and developers possess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: SkillName,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSkillData {
    /// Persisted skill identifier.
    pub id: SkillId,
    /// Persisted skill name.
    pub name: SkillName,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Creates a new skill with a fresh identifier.
    #[must_use]
    pub fn new(name: SkillName, clock: &impl Clock) -> Self {
        Self {
            id: SkillId::new(),
            name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a skill from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSkillData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            created_at: data.created_at,
        }
    }

    /// Returns the skill identifier.
    #[must_use]
    pub const fn id(&self) -> SkillId {
        self.id
    }

    /// Returns the skill name.
    #[must_use]
    pub const fn name(&self) -> &SkillName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
