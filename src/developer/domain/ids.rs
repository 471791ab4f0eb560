//! Identifier and validated scalar types for the developer domain.

use super::DeveloperDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeveloperId(Uuid);

impl DeveloperId {
    /// Creates a new random developer identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a developer identifier from an existing UUID.
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

impl Default for DeveloperId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for DeveloperId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DeveloperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a developer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeveloperName(String);

impl DeveloperName {
    /// Maximum length accepted by the `developers.name` column.
    pub const MAX_LENGTH: usize = 100;

    /// Creates a validated developer name.
    ///
    /// # Errors
    ///
    /// Returns [`DeveloperDomainError::EmptyDeveloperName`] when the trimmed
    /// value is empty, or [`DeveloperDomainError::DeveloperNameTooLong`] when
    /// it exceeds [`Self::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DeveloperDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeveloperDomainError::EmptyDeveloperName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(DeveloperDomainError::DeveloperNameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the developer name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeveloperName {
    type Error = DeveloperDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeveloperName> for String {
    fn from(value: DeveloperName) -> Self {
        value.0
    }
}

impl AsRef<str> for DeveloperName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DeveloperName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
