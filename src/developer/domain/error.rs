//! Error types for developer domain validation.

use thiserror::Error;

/// Errors returned while constructing developer domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeveloperDomainError {
    /// The developer name is empty after trimming.
    #[error("developer name must not be empty")]
    EmptyDeveloperName,

    /// The developer name exceeds the storage limit.
    #[error("developer name exceeds 100 character limit: {0}")]
    DeveloperNameTooLong(String),
}
