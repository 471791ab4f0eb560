//! `PostgreSQL` repository implementation for the skill catalog.

use super::{
    models::{NewSkillRow, SkillRow},
    schema::skills,
};
use crate::config::PgPool;
use crate::skill::{
    domain::{PersistedSkillData, Skill, SkillId, SkillName},
    ports::{SkillRepository, SkillRepositoryError, SkillRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed skill repository.
#[derive(Debug, Clone)]
pub struct PostgresSkillRepository {
    pool: PgPool,
}

impl PostgresSkillRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SkillRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SkillRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SkillRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SkillRepositoryError::persistence)?
    }
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn store(&self, skill: &Skill) -> SkillRepositoryResult<()> {
        let skill_id = skill.id();
        let skill_name = skill.name().clone();
        let new_row = NewSkillRow {
            id: skill_id.into_inner(),
            name: skill_name.as_str().to_owned(),
            created_at: skill.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(skills::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        SkillRepositoryError::DuplicateSkillName(skill_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SkillRepositoryError::DuplicateSkill(skill_id)
                    }
                    _ => SkillRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: SkillId) -> SkillRepositoryResult<Option<Skill>> {
        self.run_blocking(move |connection| {
            let row = skills::table
                .filter(skills::id.eq(id.into_inner()))
                .select(SkillRow::as_select())
                .first::<SkillRow>(connection)
                .optional()
                .map_err(SkillRepositoryError::persistence)?;
            row.map(row_to_skill).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[SkillId]) -> SkillRepositoryResult<Vec<Skill>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = skills::table
                .filter(skills::id.eq_any(&uuids))
                .select(SkillRow::as_select())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_skill).collect()
        })
        .await
    }

    async fn list_all(&self) -> SkillRepositoryResult<Vec<Skill>> {
        self.run_blocking(move |connection| {
            let rows = skills::table
                .order(skills::name.asc())
                .select(SkillRow::as_select())
                .load::<SkillRow>(connection)
                .map_err(SkillRepositoryError::persistence)?;
            rows.into_iter().map(row_to_skill).collect()
        })
        .await
    }
}

fn row_to_skill(row: SkillRow) -> SkillRepositoryResult<Skill> {
    let name = SkillName::new(row.name).map_err(SkillRepositoryError::invalid_persisted_data)?;
    Ok(Skill::from_persisted(PersistedSkillData {
        id: SkillId::from_uuid(row.id),
        name,
        created_at: row.created_at,
    }))
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_skills_name_unique")
}
