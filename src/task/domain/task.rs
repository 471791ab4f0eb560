//! Task node aggregate and task status.

use super::{ParseTaskStatusError, TaskId, TaskTitle};
use crate::developer::domain::DeveloperId;
use crate::skill::domain::SkillId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Task status.
///
/// Any status may move to any other. Moving *into* [`TaskStatus::Done`] is
/// gated on the whole subtree being done; see
/// [`TaskTree::incomplete_descendants`](super::TaskTree::incomplete_descendants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    #[serde(rename = "To-do")]
    Todo,
    /// Work is under way.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is complete.
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "To-do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Returns whether the status is [`TaskStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single node of a task tree as stored.
///
/// Relations are held by identifier; [`TaskNode`](super::TaskNode) is the
/// populated read view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    status: TaskStatus,
    parent_id: Option<TaskId>,
    required_skill_ids: BTreeSet<SkillId>,
    assigned_developer_id: Option<DeveloperId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted parent link, if any.
    pub parent_id: Option<TaskId>,
    /// Persisted required-skill links.
    pub required_skill_ids: BTreeSet<SkillId>,
    /// Persisted assignee link, if any.
    pub assigned_developer_id: Option<DeveloperId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new unassigned task in [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(
        title: TaskTitle,
        required_skill_ids: impl IntoIterator<Item = SkillId>,
        parent_id: Option<TaskId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            status: TaskStatus::Todo,
            parent_id,
            required_skill_ids: required_skill_ids.into_iter().collect(),
            assigned_developer_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the initial status of a task under construction.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            parent_id: data.parent_id,
            required_skill_ids: data.required_skill_ids,
            assigned_developer_id: data.assigned_developer_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the parent task identifier, or `None` for a top-level task.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns whether the task has no parent.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the identifiers of the skills this task requires.
    #[must_use]
    pub const fn required_skill_ids(&self) -> &BTreeSet<SkillId> {
        &self.required_skill_ids
    }

    /// Returns the assigned developer identifier, if any.
    #[must_use]
    pub const fn assigned_developer_id(&self) -> Option<DeveloperId> {
        self.assigned_developer_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle) {
        self.title = title;
    }

    /// Sets the status without any completion guard.
    ///
    /// Callers moving a task into [`TaskStatus::Done`] must check the subtree
    /// first.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Replaces the required-skill set wholesale.
    pub fn replace_required_skills(&mut self, skill_ids: impl IntoIterator<Item = SkillId>) {
        self.required_skill_ids = skill_ids.into_iter().collect();
    }

    /// Links a developer to the task.
    ///
    /// Eligibility must be checked beforehand with
    /// [`validate_assignment`](super::validate_assignment).
    pub const fn assign(&mut self, developer_id: DeveloperId) {
        self.assigned_developer_id = Some(developer_id);
    }

    /// Removes the assignee, if any.
    pub const fn unassign(&mut self) {
        self.assigned_developer_id = None;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
