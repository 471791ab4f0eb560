//! Service layer for creating, reading, and updating task trees.
//!
//! Creation validates a whole request tree in memory before a single
//! atomic store. Updates act on one node at a time, with the completion
//! guard and assignment checks run before anything is written. Every
//! successful write is followed by a reload, so callers only ever see
//! committed state.

use super::requests::{AssigneeUpdate, CreateTaskRequest, UpdateTaskRequest};
use crate::developer::{
    domain::{Developer, DeveloperId, DeveloperName},
    ports::{DeveloperRepository, DeveloperRepositoryError},
};
use crate::skill::{
    domain::{Skill, SkillId, SkillName},
    ports::{SkillRepository, SkillRepositoryError},
};
use crate::task::{
    domain::{
        AssignmentError, DanglingReference, ParentRef, ReferenceIndex, Task, TaskDomainError,
        TaskId, TaskNode, TaskStatus, TaskTitle, TaskTree, TreeLimits, missing_skill_ids, validate_assignment,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// A referenced record that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Unknown skill.
    Skill(SkillId),
    /// Unknown developer.
    Developer(DeveloperId),
    /// Unknown task.
    Task(TaskId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill(id) => write!(f, "Skill with ID {id} not found"),
            Self::Developer(id) => write!(f, "Developer with ID {id} not found"),
            Self::Task(id) => write!(f, "Task with ID {id} not found"),
        }
    }
}

/// Service-level errors for task tree operations.
#[derive(Debug, Error)]
pub enum TaskTreeError {
    /// A referenced skill, developer, or task does not exist.
    #[error("{0}")]
    NotFound(Missing),

    /// The developer lacks at least one required skill.
    #[error(
        "Developer \"{developer}\" does not have the required skill(s): {}. Task can only be assigned to a developer with all required skills.",
        join(.missing_skills)
    )]
    IneligibleAssignment {
        /// Display name of the rejected developer.
        developer: DeveloperName,
        /// Names of the missing skills, sorted.
        missing_skills: Vec<SkillName>,
    },

    /// The task cannot be marked done while descendants are unfinished.
    #[error(
        "Task cannot be marked as Done while subtasks are incomplete: {}",
        .incomplete.join(", ")
    )]
    IncompleteSubtasks {
        /// Task whose completion was refused.
        task_id: TaskId,
        /// Titles of the blocking descendants.
        incomplete: Vec<String>,
    },

    /// Stored relations refer to records that do not exist.
    #[error("data consistency fault: {0}")]
    Consistency(String),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Skill lookup failed.
    #[error(transparent)]
    SkillRepository(#[from] SkillRepositoryError),

    /// Developer lookup failed.
    #[error(transparent)]
    DeveloperRepository(#[from] DeveloperRepositoryError),
}

impl TaskTreeError {
    /// Returns whether the caller can correct the request and retry.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::IneligibleAssignment { .. }
                | Self::IncompleteSubtasks { .. }
                | Self::Domain(_)
        )
    }
}

impl From<AssignmentError> for TaskTreeError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::Ineligible {
                developer,
                missing_skills,
            } => Self::IneligibleAssignment {
                developer,
                missing_skills,
            },
            AssignmentError::UnresolvedSkill(id) => {
                Self::Consistency(format!("required skill {id} is not in the catalog"))
            }
        }
    }
}

impl From<DanglingReference> for TaskTreeError {
    fn from(err: DanglingReference) -> Self {
        Self::Consistency(err.to_string())
    }
}

fn join(names: &[SkillName]) -> String {
    names
        .iter()
        .map(SkillName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for task tree service operations.
pub type TaskTreeResult<T> = Result<T, TaskTreeError>;

/// Records resolved up front for validating a creation request.
struct Resolved {
    skills: HashMap<SkillId, Skill>,
    developers: HashMap<DeveloperId, Developer>,
}

/// Task tree orchestration service.
#[derive(Clone)]
pub struct TaskTreeService<T, S, D, C>
where
    T: TaskRepository,
    S: SkillRepository,
    D: DeveloperRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    skills: Arc<S>,
    developers: Arc<D>,
    clock: Arc<C>,
    limits: TreeLimits,
}

impl<T, S, D, C> TaskTreeService<T, S, D, C>
where
    T: TaskRepository,
    S: SkillRepository,
    D: DeveloperRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task tree service with default limits.
    #[must_use]
    pub fn new(tasks: Arc<T>, skills: Arc<S>, developers: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            skills,
            developers,
            clock,
            limits: TreeLimits::default(),
        }
    }

    /// Replaces the tree limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: TreeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Creates a task and all of its subtasks as one unit.
    ///
    /// Nodes are validated root first, each node's subtasks after the node
    /// itself. Nothing is stored unless every node passes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTreeError::NotFound`] for an unknown skill or developer,
    /// [`TaskTreeError::IneligibleAssignment`] when an inline assignee lacks
    /// a required skill, [`TaskTreeError::IncompleteSubtasks`] when a node
    /// requested as done has unfinished subtasks, or
    /// [`TaskTreeError::Domain`] for invalid titles,
    /// a top-level task without skills, or a tree over the configured
    /// limits.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskTreeResult<TaskNode> {
        self.limits
            .check_shape(request.depth(), request.node_count())?;

        let resolved = self.resolve_request_references(&request).await?;
        let tree = self.build_tree(request, None, &resolved)?;
        let root_id = tree.task().id();
        let nodes = tree.node_count();

        self.tasks.store_tree(&tree).await?;
        tracing::info!(task_id = %root_id, nodes, "created task tree");
        self.get(root_id).await
    }

    /// Retrieves a task with its parent reference and full subtree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTreeError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TaskTreeResult<TaskNode> {
        tracing::debug!(task_id = %id, "loading task");
        let tree = self.load_tree(id).await?;
        let parent = match tree.task().parent_id() {
            Some(parent_id) => {
                let stored = self.tasks.find_by_id(parent_id).await?.ok_or_else(|| {
                    TaskTreeError::Consistency(format!("task {id} has unknown parent {parent_id}"))
                })?;
                Some(ParentRef::from(&stored))
            }
            None => None,
        };
        let index = self.reference_index(std::slice::from_ref(&tree)).await?;
        Ok(index.populate(&tree, parent)?)
    }

    /// Lists every top-level task with its full subtree, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTreeError::Repository`] when persistence lookup fails.
    pub async fn list_top_level(&self) -> TaskTreeResult<Vec<TaskNode>> {
        let trees = self.tasks.list_top_level().await?;
        tracing::debug!(count = trees.len(), "listing top-level tasks");
        let index = self.reference_index(&trees).await?;
        trees
            .iter()
            .map(|tree| index.populate(tree, None).map_err(TaskTreeError::from))
            .collect()
    }

    /// Applies a partial update to a single task node.
    ///
    /// The completion guard runs before any field changes, and a rejected
    /// update leaves the stored node untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTreeError::NotFound`] for an unknown task, skill, or
    /// developer, [`TaskTreeError::IncompleteSubtasks`] when marking the task
    /// done while descendants are unfinished, or
    /// [`TaskTreeError::IneligibleAssignment`] when the new or existing
    /// assignee lacks a required skill.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskTreeResult<TaskNode> {
        let (title, status, skill_ids, assignee) = request.into_parts();
        let tree = self.load_tree(id).await?;
        check_completion(&tree, status)?;

        let mut task = tree.into_parts().0;
        if let Some(new_title) = title {
            task.rename(self.validated_title(&new_title)?);
        }
        if let Some(new_status) = status {
            task.set_status(new_status);
        }
        let skills_changed = skill_ids.is_some();
        if let Some(requested) = skill_ids {
            let resolved = self.resolve_skill_ids(&requested).await?;
            if resolved.is_empty() && task.is_top_level() {
                return Err(TaskDomainError::MissingRequiredSkills(task.title().to_string()).into());
            }
            task.replace_required_skills(resolved);
        }
        self.apply_assignee(&mut task, assignee, skills_changed).await?;

        task.touch(&*self.clock);
        self.tasks.update_node(&task).await?;
        tracing::info!(task_id = %id, status = %task.status(), "updated task");
        self.get(id).await
    }

    async fn load_tree(&self, id: TaskId) -> TaskTreeResult<TaskTree> {
        self.tasks
            .load_subtree(id)
            .await?
            .ok_or(TaskTreeError::NotFound(Missing::Task(id)))
    }

    fn validated_title(&self, title: &str) -> TaskTreeResult<TaskTitle> {
        let validated = TaskTitle::new(title)?;
        self.limits.check_title(&validated)?;
        Ok(validated)
    }

    async fn apply_assignee(
        &self,
        task: &mut Task,
        update: AssigneeUpdate,
        skills_changed: bool,
    ) -> TaskTreeResult<()> {
        match update {
            AssigneeUpdate::Clear => task.unassign(),
            AssigneeUpdate::Assign(developer_id) => {
                let developer = self
                    .developers
                    .find_by_id(developer_id)
                    .await?
                    .ok_or(TaskTreeError::NotFound(Missing::Developer(developer_id)))?;
                self.check_eligibility(task.id(), &developer, task.required_skill_ids())
                    .await?;
                task.assign(developer_id);
            }
            AssigneeUpdate::Unchanged => {
                if let Some(developer_id) = task.assigned_developer_id()
                    && skills_changed
                {
                    let developer = self.developers.find_by_id(developer_id).await?.ok_or_else(|| {
                        TaskTreeError::Consistency(format!(
                            "task {} is assigned to unknown developer {developer_id}",
                            task.id()
                        ))
                    })?;
                    self.check_eligibility(task.id(), &developer, task.required_skill_ids())
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn check_eligibility(
        &self,
        task_id: TaskId,
        developer: &Developer,
        required: &BTreeSet<SkillId>,
    ) -> TaskTreeResult<()> {
        let missing: Vec<SkillId> = missing_skill_ids(developer, required).into_iter().collect();
        if missing.is_empty() {
            return Ok(());
        }
        let names: HashMap<SkillId, Skill> = self
            .skills
            .find_by_ids(&missing)
            .await?
            .into_iter()
            .map(|skill| (skill.id(), skill))
            .collect();
        validate_assignment(developer, required, &names).map_err(|err| {
            reject_assignment(task_id, &err);
            TaskTreeError::from(err)
        })
    }

    async fn resolve_skill_ids(&self, ids: &[SkillId]) -> TaskTreeResult<BTreeSet<SkillId>> {
        let found: BTreeSet<SkillId> = self
            .skills
            .find_by_ids(ids)
            .await?
            .iter()
            .map(Skill::id)
            .collect();
        match ids.iter().find(|id| !found.contains(id)) {
            Some(unknown) => Err(TaskTreeError::NotFound(Missing::Skill(*unknown))),
            None => Ok(found),
        }
    }

    async fn resolve_request_references(
        &self,
        request: &CreateTaskRequest,
    ) -> TaskTreeResult<Resolved> {
        let mut skill_ids = BTreeSet::new();
        let mut developer_ids = BTreeSet::new();
        let mut pending = vec![request];
        while let Some(node) = pending.pop() {
            skill_ids.extend(node.required_skill_ids().iter().copied());
            developer_ids.extend(node.assigned_developer_id());
            pending.extend(node.subtasks());
        }

        let skill_lookup: Vec<SkillId> = skill_ids.into_iter().collect();
        let developer_lookup: Vec<DeveloperId> = developer_ids.into_iter().collect();
        let skills = self.skills.find_by_ids(&skill_lookup).await?;
        let developers = self.developers.find_by_ids(&developer_lookup).await?;
        Ok(Resolved {
            skills: skills.into_iter().map(|skill| (skill.id(), skill)).collect(),
            developers: developers
                .into_iter()
                .map(|developer| (developer.id(), developer))
                .collect(),
        })
    }

    fn build_tree(
        &self,
        request: CreateTaskRequest,
        parent_id: Option<TaskId>,
        resolved: &Resolved,
    ) -> TaskTreeResult<TaskTree> {
        let (raw_title, status, assignee, skill_ids, subtasks) = request.into_parts();
        let title = self.validated_title(&raw_title)?;
        if parent_id.is_none() && skill_ids.is_empty() {
            return Err(TaskDomainError::MissingRequiredSkills(title.to_string()).into());
        }
        if let Some(unknown) = skill_ids
            .iter()
            .find(|id| !resolved.skills.contains_key(id))
        {
            return Err(TaskTreeError::NotFound(Missing::Skill(*unknown)));
        }

        let mut task =
            Task::new(title, skill_ids, parent_id, &*self.clock).with_status(status.unwrap_or_default());
        if let Some(developer_id) = assignee {
            let developer = resolved
                .developers
                .get(&developer_id)
                .ok_or(TaskTreeError::NotFound(Missing::Developer(developer_id)))?;
            validate_assignment(developer, task.required_skill_ids(), &resolved.skills).map_err(
                |err| {
                    reject_assignment(task.id(), &err);
                    TaskTreeError::from(err)
                },
            )?;
            task.assign(developer_id);
        }

        let children = subtasks
            .into_iter()
            .map(|subtask| self.build_tree(subtask, Some(task.id()), resolved))
            .collect::<TaskTreeResult<Vec<_>>>()?;
        let tree = TaskTree::new(task, children);
        if tree.task().status().is_done() {
            refuse_incomplete(&tree)?;
        }
        Ok(tree)
    }

    async fn reference_index(&self, trees: &[TaskTree]) -> TaskTreeResult<ReferenceIndex> {
        let mut skill_ids = BTreeSet::new();
        let mut developer_ids = BTreeSet::new();
        for tree in trees {
            let (tree_skills, tree_developers) = ReferenceIndex::references_of(tree);
            skill_ids.extend(tree_skills);
            developer_ids.extend(tree_developers);
        }

        let developer_lookup: Vec<DeveloperId> = developer_ids.into_iter().collect();
        let developers = self.developers.find_by_ids(&developer_lookup).await?;
        for developer in &developers {
            skill_ids.extend(developer.skill_ids().iter().copied());
        }
        let skill_lookup: Vec<SkillId> = skill_ids.into_iter().collect();
        let skills = self.skills.find_by_ids(&skill_lookup).await?;
        Ok(ReferenceIndex::new(skills, developers))
    }
}

fn check_completion(tree: &TaskTree, requested: Option<TaskStatus>) -> TaskTreeResult<()> {
    let completing = requested.is_some_and(TaskStatus::is_done);
    if !completing || tree.task().status().is_done() {
        return Ok(());
    }
    refuse_incomplete(tree)
}

fn refuse_incomplete(tree: &TaskTree) -> TaskTreeResult<()> {
    let incomplete = tree.incomplete_descendants();
    if incomplete.is_empty() {
        return Ok(());
    }
    tracing::warn!(
        task_id = %tree.task().id(),
        blocking = incomplete.len(),
        "refused to complete task with incomplete subtasks"
    );
    Err(TaskTreeError::IncompleteSubtasks {
        task_id: tree.task().id(),
        incomplete,
    })
}

fn reject_assignment(task_id: TaskId, err: &AssignmentError) {
    if let AssignmentError::Ineligible {
        developer,
        missing_skills,
    } = err
    {
        tracing::warn!(
            task_id = %task_id,
            developer = %developer,
            missing = %join(missing_skills),
            "refused ineligible assignment"
        );
    }
}
