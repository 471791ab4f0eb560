//! Fills in missing skill requirements from task titles.

use crate::inference::ports::SkillInference;
use crate::skill::{
    domain::{Skill, SkillId},
    ports::{SkillRepository, SkillRepositoryResult},
};
use crate::task::services::CreateTaskRequest;
use std::sync::Arc;

/// Resolves required skills for incoming tasks.
///
/// Explicit requirements always win. Inference is consulted only for tasks
/// that name no skills, and its suggestions are mapped back onto catalogued
/// identifiers.
pub struct SkillResolver<I, S>
where
    I: SkillInference + ?Sized,
    S: SkillRepository,
{
    inference: Arc<I>,
    skills: Arc<S>,
}

impl<I, S> Clone for SkillResolver<I, S>
where
    I: SkillInference + ?Sized,
    S: SkillRepository,
{
    fn clone(&self) -> Self {
        Self {
            inference: Arc::clone(&self.inference),
            skills: Arc::clone(&self.skills),
        }
    }
}

impl<I, S> SkillResolver<I, S>
where
    I: SkillInference + ?Sized,
    S: SkillRepository,
{
    /// Creates a resolver over an inference port and the skill catalog.
    #[must_use]
    pub const fn new(inference: Arc<I>, skills: Arc<S>) -> Self {
        Self { inference, skills }
    }

    /// Returns the skills a task requires.
    ///
    /// Non-empty `explicit` identifiers are returned unchanged. Otherwise the
    /// title is sent to inference together with the catalog's skill names.
    /// A blank title resolves to no skills without consulting inference.
    ///
    /// # Errors
    ///
    /// Returns a skill repository error when the catalog cannot be read.
    pub async fn resolve_required_skills(
        &self,
        title: &str,
        explicit: &[SkillId],
    ) -> SkillRepositoryResult<Vec<SkillId>> {
        if !explicit.is_empty() {
            return Ok(explicit.to_vec());
        }
        if title.trim().is_empty() {
            return Ok(Vec::new());
        }
        let catalog = self.skills.list_all().await?;
        Ok(self.infer_ids(title, &catalog).await)
    }

    /// Infers skills for several titles, reading the catalog once.
    ///
    /// The result holds one entry per title, in input order.
    ///
    /// # Errors
    ///
    /// Returns a skill repository error when the catalog cannot be read.
    pub async fn resolve_batch(&self, titles: &[String]) -> SkillRepositoryResult<Vec<Vec<SkillId>>> {
        let catalog = self.skills.list_all().await?;
        let mut resolved = Vec::with_capacity(titles.len());
        for title in titles {
            if title.trim().is_empty() {
                resolved.push(Vec::new());
            } else {
                resolved.push(self.infer_ids(title, &catalog).await);
            }
        }
        Ok(resolved)
    }

    /// Fills empty skill requirements throughout a create request tree.
    ///
    /// Nodes that already name skills are left untouched. Returns the number
    /// of nodes whose requirements were inferred.
    ///
    /// # Errors
    ///
    /// Returns a skill repository error when the catalog cannot be read.
    pub async fn fill_missing(&self, request: &mut CreateTaskRequest) -> SkillRepositoryResult<usize> {
        let catalog = self.skills.list_all().await?;
        let mut filled = 0;
        let mut pending: Vec<&mut CreateTaskRequest> = vec![request];
        while let Some(node) = pending.pop() {
            if node.required_skill_ids().is_empty() && !node.title().trim().is_empty() {
                let inferred = self.infer_ids(node.title(), &catalog).await;
                if !inferred.is_empty() {
                    node.set_required_skill_ids(inferred);
                    filled += 1;
                }
            }
            pending.extend(node.subtasks_mut().iter_mut().rev());
        }
        tracing::debug!(filled, "filled missing skill requirements");
        Ok(filled)
    }

    async fn infer_ids(&self, title: &str, catalog: &[Skill]) -> Vec<SkillId> {
        let names: Vec<String> = catalog
            .iter()
            .map(|skill| skill.name().as_str().to_owned())
            .collect();
        self.inference
            .infer(title, &names)
            .await
            .iter()
            .filter_map(|name| {
                catalog
                    .iter()
                    .find(|skill| skill.name().as_str().eq_ignore_ascii_case(name))
                    .map(Skill::id)
            })
            .fold(Vec::new(), |mut ids, id| {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                ids
            })
    }
}
