//! Diesel row models for task persistence.

use super::schema::{task_skills, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
///
/// `seq` stays in SQL: queries order by it and never read it back.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    /// Workflow status wire value.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Parent node, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub parent_id: Option<uuid::Uuid>,
    /// Assigned developer, if any.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Uuid>)]
    pub assigned_developer_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records; `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Workflow status wire value.
    pub status: String,
    /// Parent node, if any.
    pub parent_id: Option<uuid::Uuid>,
    /// Assigned developer, if any.
    pub assigned_developer_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a node's mutable fields are replaced.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Workflow status wire value.
    pub status: String,
    /// Assigned developer; `None` clears the link.
    pub assigned_developer_id: Option<uuid::Uuid>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Link between a task and one of its required skills.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskSkillRow {
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Required skill.
    pub skill_id: uuid::Uuid,
}
