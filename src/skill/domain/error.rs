//! Error types for skill domain validation.

use thiserror::Error;

/// Errors returned while constructing skill domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkillDomainError {
    /// The skill name is empty after trimming.
    #[error("skill name must not be empty")]
    EmptySkillName,

    /// The skill name exceeds the storage limit.
    #[error("skill name exceeds 50 character limit: {0}")]
    SkillNameTooLong(String),
}
