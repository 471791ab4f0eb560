//! `PostgreSQL` repository implementation for the developer roster.

use super::{
    models::{DeveloperRow, DeveloperSkillRow, NewDeveloperRow},
    schema::{developer_skills, developers},
};
use crate::config::PgPool;
use crate::developer::{
    domain::{Developer, DeveloperId, DeveloperName, PersistedDeveloperData},
    ports::{DeveloperRepository, DeveloperRepositoryError, DeveloperRepositoryResult},
};
use crate::skill::domain::SkillId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};

/// `PostgreSQL`-backed developer repository.
#[derive(Debug, Clone)]
pub struct PostgresDeveloperRepository {
    pool: PgPool,
}

impl PostgresDeveloperRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DeveloperRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DeveloperRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(DeveloperRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DeveloperRepositoryError::persistence)?
    }
}

impl From<DieselError> for DeveloperRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl DeveloperRepository for PostgresDeveloperRepository {
    async fn store(&self, developer: &Developer) -> DeveloperRepositoryResult<()> {
        let developer_id = developer.id();
        let new_row = NewDeveloperRow {
            id: developer_id.into_inner(),
            name: developer.name().as_str().to_owned(),
            created_at: developer.created_at(),
        };
        let skill_rows: Vec<DeveloperSkillRow> = developer
            .skill_ids()
            .iter()
            .map(|skill_id| DeveloperSkillRow {
                developer_id: developer_id.into_inner(),
                skill_id: skill_id.into_inner(),
            })
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, DeveloperRepositoryError, _>(|tx| {
                diesel::insert_into(developers::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DeveloperRepositoryError::DuplicateDeveloper(developer_id)
                        }
                        _ => DeveloperRepositoryError::persistence(err),
                    })?;
                if !skill_rows.is_empty() {
                    diesel::insert_into(developer_skills::table)
                        .values(&skill_rows)
                        .execute(tx)
                        .map_err(DeveloperRepositoryError::persistence)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: DeveloperId) -> DeveloperRepositoryResult<Option<Developer>> {
        self.run_blocking(move |connection| {
            let rows = developers::table
                .filter(developers::id.eq(id.into_inner()))
                .select(DeveloperRow::as_select())
                .load::<DeveloperRow>(connection)
                .map_err(DeveloperRepositoryError::persistence)?;
            Ok(attach_skills(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[DeveloperId]) -> DeveloperRepositoryResult<Vec<Developer>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = developers::table
                .filter(developers::id.eq_any(&uuids))
                .select(DeveloperRow::as_select())
                .load::<DeveloperRow>(connection)
                .map_err(DeveloperRepositoryError::persistence)?;
            attach_skills(connection, rows)
        })
        .await
    }

    async fn list_all(&self) -> DeveloperRepositoryResult<Vec<Developer>> {
        self.run_blocking(move |connection| {
            let rows = developers::table
                .order(developers::name.asc())
                .select(DeveloperRow::as_select())
                .load::<DeveloperRow>(connection)
                .map_err(DeveloperRepositoryError::persistence)?;
            attach_skills(connection, rows)
        })
        .await
    }
}

/// Loads skill links for the given rows and rebuilds domain developers,
/// preserving row order.
fn attach_skills(
    connection: &mut PgConnection,
    rows: Vec<DeveloperRow>,
) -> DeveloperRepositoryResult<Vec<Developer>> {
    let ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let links = developer_skills::table
        .filter(developer_skills::developer_id.eq_any(&ids))
        .select(DeveloperSkillRow::as_select())
        .load::<DeveloperSkillRow>(connection)
        .map_err(DeveloperRepositoryError::persistence)?;

    let mut skills_by_developer: HashMap<uuid::Uuid, BTreeSet<SkillId>> = HashMap::new();
    for link in links {
        skills_by_developer
            .entry(link.developer_id)
            .or_default()
            .insert(SkillId::from_uuid(link.skill_id));
    }

    rows.into_iter()
        .map(|row| {
            let skill_ids = skills_by_developer.remove(&row.id).unwrap_or_default();
            let name = DeveloperName::new(row.name)
                .map_err(DeveloperRepositoryError::invalid_persisted_data)?;
            Ok(Developer::from_persisted(PersistedDeveloperData {
                id: DeveloperId::from_uuid(row.id),
                name,
                skill_ids,
                created_at: row.created_at,
            }))
        })
        .collect()
}
