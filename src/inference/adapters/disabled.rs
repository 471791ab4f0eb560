//! Inference adapter used when no model is configured.

use crate::inference::ports::SkillInference;
use async_trait::async_trait;

/// Inference adapter that never suggests any skill.
#[derive(Debug, Clone, Copy)]
pub struct DisabledInference;

impl DisabledInference {
    /// Creates the adapter and records that inference is off.
    #[must_use]
    pub fn new() -> Self {
        tracing::warn!(
            "GEMINI_API_KEY not set; skill inference from task titles is disabled"
        );
        Self
    }
}

impl Default for DisabledInference {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SkillInference for DisabledInference {
    async fn infer(&self, title: &str, _known_skills: &[String]) -> Vec<String> {
        tracing::debug!(title, "skill inference disabled; returning no skills");
        Vec::new()
    }
}
