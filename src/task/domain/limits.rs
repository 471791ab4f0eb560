//! Size limits applied to submitted task trees.

use super::{TaskDomainError, TaskTitle};
use serde::{Deserialize, Serialize};

/// Configuration for task tree validation.
///
/// # Examples
///
/// ```
/// use taskforge::task::domain::TreeLimits;
///
/// let limits = TreeLimits::default();
/// assert_eq!(limits.max_depth, 8);
///
/// let strict = TreeLimits::strict();
/// assert!(strict.max_nodes_per_tree < limits.max_nodes_per_tree);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLimits {
    /// Maximum number of levels in a tree; a lone task has depth 1.
    pub max_depth: usize,
    /// Maximum number of nodes created in a single request.
    pub max_nodes_per_tree: usize,
    /// Maximum title length in characters.
    pub max_title_length: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_nodes_per_tree: 256,
            max_title_length: 500,
        }
    }
}

impl TreeLimits {
    /// Creates a lenient configuration for bulk imports.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_depth: 32,
            max_nodes_per_tree: 4096,
            ..Default::default()
        }
    }

    /// Creates a strict configuration with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_depth: 3,
            max_nodes_per_tree: 32,
            max_title_length: 200,
        }
    }

    /// Checks a title against the configured length limit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskTitleTooLong`] when the title is longer
    /// than [`Self::max_title_length`].
    pub fn check_title(&self, title: &TaskTitle) -> Result<(), TaskDomainError> {
        let length = title.char_count();
        if length > self.max_title_length {
            return Err(TaskDomainError::TaskTitleTooLong {
                length,
                max: self.max_title_length,
            });
        }
        Ok(())
    }

    /// Checks the shape of a submitted tree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TreeTooDeep`] or
    /// [`TaskDomainError::TreeTooLarge`] when a limit is exceeded.
    pub const fn check_shape(&self, depth: usize, node_count: usize) -> Result<(), TaskDomainError> {
        if depth > self.max_depth {
            return Err(TaskDomainError::TreeTooDeep {
                max: self.max_depth,
            });
        }
        if node_count > self.max_nodes_per_tree {
            return Err(TaskDomainError::TreeTooLarge {
                count: node_count,
                max: self.max_nodes_per_tree,
            });
        }
        Ok(())
    }
}
