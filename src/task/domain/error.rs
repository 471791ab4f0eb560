//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the configured length limit.
    #[error("task title is {length} characters long, limit is {max}")]
    TaskTitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Configured limit.
        max: usize,
    },

    /// A top-level task was submitted without required skills.
    #[error("top-level task '{0}' must require at least one skill")]
    MissingRequiredSkills(String),

    /// The submitted tree nests deeper than allowed.
    #[error("task tree exceeds maximum depth of {max}")]
    TreeTooDeep {
        /// Configured depth limit.
        max: usize,
    },

    /// The submitted tree contains more nodes than allowed.
    #[error("task tree has {count} nodes, limit is {max}")]
    TreeTooLarge {
        /// Number of nodes submitted.
        count: usize,
        /// Configured node limit.
        max: usize,
    },
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
