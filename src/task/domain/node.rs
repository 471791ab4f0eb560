//! Populated read views of task trees.

use super::{Task, TaskId, TaskStatus, TaskTitle, TaskTree};
use crate::developer::domain::{Developer, DeveloperId, DeveloperName};
use crate::skill::domain::{Skill, SkillId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Reference to a node's parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    /// Parent task identifier.
    pub id: TaskId,
    /// Parent task title.
    pub title: TaskTitle,
}

impl From<&Task> for ParentRef {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().clone(),
        }
    }
}

/// Assigned developer with their skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeView {
    /// Developer identifier.
    pub id: DeveloperId,
    /// Developer display name.
    pub name: DeveloperName,
    /// Skills held by the developer, ordered by name.
    pub skills: Vec<Skill>,
}

/// A task node with every relation resolved, recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: TaskTitle,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Required skills, ordered by name.
    pub required_skills: Vec<Skill>,
    /// Assigned developer, if any.
    pub assigned_developer: Option<AssigneeView>,
    /// Parent reference; `None` for top-level tasks.
    pub parent: Option<ParentRef>,
    /// Subtasks in creation order.
    pub subtasks: Vec<TaskNode>,
}

impl TaskNode {
    /// Returns the number of nodes in this view, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.subtasks.iter().map(Self::node_count).sum::<usize>()
    }

    /// Returns the required skill identifiers.
    #[must_use]
    pub fn required_skill_ids(&self) -> BTreeSet<SkillId> {
        self.required_skills.iter().map(Skill::id).collect()
    }
}

/// A stored relation that points at a record that no longer resolves.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DanglingReference {
    /// A skill link with no catalog entry.
    #[error("task references unknown skill {0}")]
    Skill(SkillId),
    /// An assignee link with no roster entry.
    #[error("task references unknown developer {0}")]
    Developer(DeveloperId),
}

/// Resolved skills and developers used to populate [`TaskNode`] views.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    skills: HashMap<SkillId, Skill>,
    developers: HashMap<DeveloperId, Developer>,
}

impl ReferenceIndex {
    /// Creates an index from resolved records.
    #[must_use]
    pub fn new(
        skills: impl IntoIterator<Item = Skill>,
        developers: impl IntoIterator<Item = Developer>,
    ) -> Self {
        Self {
            skills: skills.into_iter().map(|skill| (skill.id(), skill)).collect(),
            developers: developers
                .into_iter()
                .map(|developer| (developer.id(), developer))
                .collect(),
        }
    }

    /// Collects every skill and developer identifier a tree refers to.
    ///
    /// Assignee skill links are not included; callers resolve those after
    /// loading the developers.
    #[must_use]
    pub fn references_of(tree: &TaskTree) -> (BTreeSet<SkillId>, BTreeSet<DeveloperId>) {
        let mut skill_ids = BTreeSet::new();
        let mut developer_ids = BTreeSet::new();
        for task in tree.iter() {
            skill_ids.extend(task.required_skill_ids().iter().copied());
            developer_ids.extend(task.assigned_developer_id());
        }
        (skill_ids, developer_ids)
    }

    /// Builds the populated view of `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingReference`] when the tree refers to a skill or
    /// developer missing from the index.
    pub fn populate(
        &self,
        tree: &TaskTree,
        parent: Option<ParentRef>,
    ) -> Result<TaskNode, DanglingReference> {
        let task = tree.task();
        let required_skills = self.resolve_skills(task.required_skill_ids())?;
        let assigned_developer = task
            .assigned_developer_id()
            .map(|id| self.resolve_assignee(id))
            .transpose()?;
        let own_ref = ParentRef::from(task);
        let subtasks = tree
            .subtasks()
            .iter()
            .map(|subtree| self.populate(subtree, Some(own_ref.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TaskNode {
            id: task.id(),
            title: task.title().clone(),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            required_skills,
            assigned_developer,
            parent,
            subtasks,
        })
    }

    /// Resolves skill identifiers to skills ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DanglingReference::Skill`] for the first unknown identifier.
    pub fn resolve_skills(
        &self,
        ids: &BTreeSet<SkillId>,
    ) -> Result<Vec<Skill>, DanglingReference> {
        let mut resolved = ids
            .iter()
            .map(|id| {
                self.skills
                    .get(id)
                    .cloned()
                    .ok_or(DanglingReference::Skill(*id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(resolved)
    }

    fn resolve_assignee(&self, id: DeveloperId) -> Result<AssigneeView, DanglingReference> {
        let developer = self
            .developers
            .get(&id)
            .ok_or(DanglingReference::Developer(id))?;
        Ok(AssigneeView {
            id: developer.id(),
            name: developer.name().clone(),
            skills: self.resolve_skills(developer.skill_ids())?,
        })
    }
}
