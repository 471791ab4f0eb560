//! Skill inference port.

use async_trait::async_trait;

/// Suggests catalogued skills for a task title.
///
/// Implementations are infallible by contract: any transport or parsing
/// failure is logged and reported as an empty suggestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillInference: Send + Sync {
    /// Returns the subset of `known_skills` the title appears to require.
    ///
    /// Returned names are spelled exactly as in `known_skills`, without
    /// duplicates.
    async fn infer(&self, title: &str, known_skills: &[String]) -> Vec<String>;
}
