//! Diesel row models for developer persistence.

use super::schema::{developer_skills, developers};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for developer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = developers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeveloperRow {
    /// Internal developer identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for developer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = developers)]
pub struct NewDeveloperRow {
    /// Internal developer identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Link row between a developer and a held skill.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = developer_skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeveloperSkillRow {
    /// Owning developer.
    pub developer_id: uuid::Uuid,
    /// Held skill.
    pub skill_id: uuid::Uuid,
}
