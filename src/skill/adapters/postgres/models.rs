//! Diesel row models for skill persistence.

use super::schema::skills;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for skill records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SkillRow {
    /// Internal skill identifier.
    pub id: uuid::Uuid,
    /// Unique skill name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for skill records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
pub struct NewSkillRow {
    /// Internal skill identifier.
    pub id: uuid::Uuid,
    /// Unique skill name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
