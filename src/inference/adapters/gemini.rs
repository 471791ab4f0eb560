//! Gemini `generateContent` adapter for skill inference.

use crate::inference::{
    domain::{parse_skill_names, render_prompt},
    ports::SkillInference,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Public Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Failures talking to the inference model.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The prompt template failed to render.
    #[error("failed to render skill prompt: {0}")]
    Prompt(#[from] minijinja::Error),
    /// The HTTP exchange failed or returned an error status.
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The model answered without any text.
    #[error("inference response contained no text")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub(crate) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Skill inference backed by Google's Gemini models.
#[derive(Debug, Clone)]
pub struct GeminiInference {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiInference {
    /// Creates an adapter for the given API key and model name.
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let adapter = Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_BASE.to_owned(),
        };
        tracing::info!(model = %adapter.model, "Gemini skill inference enabled");
        adapter
    }

    /// Points the adapter at a different API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the analyser prompt and returns the raw model answer.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] when rendering, transport or decoding
    /// fails, or when the answer carries no text.
    pub async fn generate(
        &self,
        title: &str,
        known_skills: &[String],
    ) -> Result<String, InferenceError> {
        let prompt = render_prompt(title, known_skills)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response: GenerateContentResponse = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.text().ok_or(InferenceError::EmptyResponse)
    }
}

#[async_trait]
impl SkillInference for GeminiInference {
    async fn infer(&self, title: &str, known_skills: &[String]) -> Vec<String> {
        if title.trim().is_empty() {
            tracing::warn!("empty task title; skipping skill inference");
            return Vec::new();
        }

        match self.generate(title, known_skills).await {
            Ok(answer) => {
                tracing::debug!(%answer, "Gemini response");
                let skills = parse_skill_names(&answer, known_skills);
                tracing::info!(title, skills = ?skills, "inferred skills for task");
                skills
            }
            Err(err) => {
                tracing::warn!(error = %err, title, "skill inference failed");
                Vec::new()
            }
        }
    }
}
