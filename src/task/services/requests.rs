//! Request payloads accepted by the task tree service.

use crate::developer::domain::DeveloperId;
use crate::skill::domain::SkillId;
use crate::task::domain::TaskStatus;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Request payload for creating a task together with its subtasks.
///
/// Field names follow the camel-case wire shape used by request layers.
///
/// # Examples
///
/// ```
/// use taskforge::skill::domain::SkillId;
/// use taskforge::task::services::CreateTaskRequest;
///
/// let frontend = SkillId::new();
/// let request = CreateTaskRequest::new("Build login form", [frontend])
///     .with_subtask(CreateTaskRequest::new("Style form", [frontend]));
/// assert_eq!(request.node_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_developer_id: Option<DeveloperId>,
    #[serde(default)]
    required_skill_ids: Vec<SkillId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<CreateTaskRequest>,
}

/// Owned fields of a [`CreateTaskRequest`], in declaration order.
pub(crate) type CreateTaskParts = (
    String,
    Option<TaskStatus>,
    Option<DeveloperId>,
    Vec<SkillId>,
    Vec<CreateTaskRequest>,
);

impl CreateTaskRequest {
    /// Creates a request for an unassigned task with no subtasks.
    #[must_use]
    pub fn new(title: impl Into<String>, required_skill_ids: impl IntoIterator<Item = SkillId>) -> Self {
        Self {
            title: title.into(),
            status: None,
            assigned_developer_id: None,
            required_skill_ids: required_skill_ids.into_iter().collect(),
            subtasks: Vec::new(),
        }
    }

    /// Sets the initial status; defaults to [`TaskStatus::Todo`].
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Assigns a developer at creation.
    #[must_use]
    pub const fn with_assignee(mut self, developer_id: DeveloperId) -> Self {
        self.assigned_developer_id = Some(developer_id);
        self
    }

    /// Appends a subtask.
    #[must_use]
    pub fn with_subtask(mut self, subtask: Self) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Replaces the subtask list.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Self>) -> Self {
        self.subtasks = subtasks.into_iter().collect();
        self
    }

    /// Returns the requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the requested initial status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assigned_developer_id(&self) -> Option<DeveloperId> {
        self.assigned_developer_id
    }

    /// Returns the requested skill identifiers.
    #[must_use]
    pub fn required_skill_ids(&self) -> &[SkillId] {
        &self.required_skill_ids
    }

    /// Replaces the requested skill identifiers.
    pub fn set_required_skill_ids(&mut self, required_skill_ids: impl IntoIterator<Item = SkillId>) {
        self.required_skill_ids = required_skill_ids.into_iter().collect();
    }

    /// Returns the direct subtask requests.
    #[must_use]
    pub fn subtasks(&self) -> &[Self] {
        &self.subtasks
    }

    /// Returns the direct subtask requests for in-place editing.
    pub fn subtasks_mut(&mut self) -> &mut [Self] {
        &mut self.subtasks
    }

    /// Returns the number of requests in the tree, this one included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.shape().1
    }

    /// Returns the number of levels in the tree; a request without
    /// subtasks has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.shape().0
    }

    /// Computes depth and node count without recursing.
    fn shape(&self) -> (usize, usize) {
        let mut depth = 0;
        let mut count = 0;
        let mut pending = vec![(self, 1_usize)];
        while let Some((request, level)) = pending.pop() {
            count += 1;
            depth = depth.max(level);
            pending.extend(request.subtasks.iter().map(|child| (child, level + 1)));
        }
        (depth, count)
    }

    pub(crate) fn into_parts(self) -> CreateTaskParts {
        (
            self.title,
            self.status,
            self.assigned_developer_id,
            self.required_skill_ids,
            self.subtasks,
        )
    }
}

/// Tri-state change to a task's assignee.
///
/// On the wire an absent field leaves the assignee untouched, `null` clears
/// it, and an identifier assigns that developer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssigneeUpdate {
    /// Keep the current assignee.
    #[default]
    Unchanged,
    /// Remove the current assignee without validation.
    Clear,
    /// Assign the developer after checking eligibility.
    Assign(DeveloperId),
}

impl AssigneeUpdate {
    /// Returns whether the update leaves the assignee untouched.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl Serialize for AssigneeUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged | Self::Clear => serializer.serialize_none(),
            Self::Assign(id) => serializer.serialize_some(id),
        }
    }
}

impl<'de> Deserialize<'de> for AssigneeUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<DeveloperId>::deserialize(deserializer)?;
        Ok(value.map_or(Self::Clear, Self::Assign))
    }
}

/// Owned fields of an [`UpdateTaskRequest`], in declaration order.
pub(crate) type UpdateTaskParts = (
    Option<String>,
    Option<TaskStatus>,
    Option<Vec<SkillId>>,
    AssigneeUpdate,
);

/// Partial update of a single task node.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required_skill_ids: Option<Vec<SkillId>>,
    #[serde(
        default,
        rename = "assignedDeveloperId",
        skip_serializing_if = "AssigneeUpdate::is_unchanged"
    )]
    assignee: AssigneeUpdate,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the required skills wholesale.
    #[must_use]
    pub fn with_required_skill_ids(mut self, ids: impl IntoIterator<Item = SkillId>) -> Self {
        self.required_skill_ids = Some(ids.into_iter().collect());
        self
    }

    /// Assigns a developer.
    #[must_use]
    pub const fn with_assignee(mut self, developer_id: DeveloperId) -> Self {
        self.assignee = AssigneeUpdate::Assign(developer_id);
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn clearing_assignee(mut self) -> Self {
        self.assignee = AssigneeUpdate::Clear;
        self
    }

    /// Returns the requested title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the requested status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the requested skill identifiers, if any.
    #[must_use]
    pub fn required_skill_ids(&self) -> Option<&[SkillId]> {
        self.required_skill_ids.as_deref()
    }

    /// Returns the requested assignee change.
    #[must_use]
    pub const fn assignee(&self) -> AssigneeUpdate {
        self.assignee
    }

    pub(crate) fn into_parts(self) -> UpdateTaskParts {
        (
            self.title,
            self.status,
            self.required_skill_ids,
            self.assignee,
        )
    }
}
