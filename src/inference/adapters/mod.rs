//! Skill inference adapters.

mod disabled;
mod gemini;

pub use disabled::DisabledInference;
pub use gemini::{GEMINI_API_BASE, GeminiInference, InferenceError};

#[cfg(test)]
pub(crate) use gemini::GenerateContentResponse;

use crate::config::InferenceConfig;
use crate::inference::ports::SkillInference;
use std::sync::Arc;

/// Builds the inference adapter selected by configuration.
///
/// A configured API key yields [`GeminiInference`]; otherwise the
/// [`DisabledInference`] fallback is returned.
#[must_use]
pub fn inference_from_config(config: &InferenceConfig) -> Arc<dyn SkillInference> {
    match config.api_key.as_deref() {
        Some(key) => Arc::new(GeminiInference::new(key, config.model.clone())),
        None => Arc::new(DisabledInference::new()),
    }
}
