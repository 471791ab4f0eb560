//! Identifier and validated scalar types for the skill domain.

use super::SkillDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a catalogued skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(Uuid);

impl SkillId {
    /// Creates a new random skill identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a skill identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for SkillId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable skill name, unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillName(String);

impl SkillName {
    /// Maximum length accepted by the `skills.name` column.
    pub const MAX_LENGTH: usize = 50;

    /// Creates a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::EmptySkillName`] when the trimmed value is
    /// empty, or [`SkillDomainError::SkillNameTooLong`] when it exceeds
    /// [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, SkillDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SkillDomainError::EmptySkillName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(SkillDomainError::SkillNameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the skill name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SkillName {
    type Error = SkillDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillName> for String {
    fn from(value: SkillName) -> Self {
        value.0
    }
}

impl AsRef<str> for SkillName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
