//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use taskforge::config::PgPool;
use taskforge::developer::{
    adapters::postgres::PostgresDeveloperRepository, services::DeveloperRosterService,
};
use taskforge::skill::{adapters::postgres::PostgresSkillRepository, services::SkillCatalogService};
use taskforge::task::{adapters::postgres::PostgresTaskRepository, services::TaskTreeService};
use uuid::Uuid;

/// Boxed error type used by the helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the server used for these tests.
pub const TEST_DATABASE_URL_VAR: &str = "TASKFORGE_TEST_DATABASE_URL";

/// SQL creating the full schema.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_task_assignment_tables/up.sql");

/// A database created for one test and dropped afterwards.
pub struct TemporaryDatabase {
    admin_url: String,
    name: String,
    pool: PgPool,
}

impl TemporaryDatabase {
    /// Creates a scratch database with the schema applied.
    ///
    /// Returns `Ok(None)` when [`TEST_DATABASE_URL_VAR`] is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or migrated.
    pub fn create() -> Result<Option<Self>, BoxError> {
        let Ok(admin_url) = std::env::var(TEST_DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let name = format!("taskforge_test_{}", Uuid::new_v4().simple());

        let mut admin = PgConnection::establish(&admin_url)?;
        admin.batch_execute(&format!("CREATE DATABASE \"{name}\""))?;

        let url = database_url(&admin_url, &name)?;
        PgConnection::establish(&url)?.batch_execute(CREATE_SCHEMA_SQL)?;
        let pool = Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(url))?;

        Ok(Some(Self {
            admin_url,
            name,
            pool,
        }))
    }

    /// Returns a handle to the scratch database pool.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let statement = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name);
        let outcome = PgConnection::establish(&self.admin_url)
            .map_err(|err| Box::new(err) as BoxError)
            .and_then(|mut conn| {
                conn.batch_execute(&statement)
                    .map_err(|err| Box::new(err) as BoxError)
            });
        if let Err(err) = outcome {
            tracing::warn!(database = %self.name, error = %err, "failed to drop test database");
        }
    }
}

fn database_url(admin_url: &str, name: &str) -> Result<String, BoxError> {
    let (server, _database) = admin_url
        .rsplit_once('/')
        .ok_or_else(|| format!("{TEST_DATABASE_URL_VAR} is not a database URL"))?;
    Ok(format!("{server}/{name}"))
}

/// Task tree service backed by Diesel adapters.
pub type PgTaskService = TaskTreeService<
    PostgresTaskRepository,
    PostgresSkillRepository,
    PostgresDeveloperRepository,
    DefaultClock,
>;

/// All services of one board over a scratch database.
pub struct PgBoard {
    /// Keeps the scratch database alive for the test.
    pub database: TemporaryDatabase,
    /// Skill catalog.
    pub catalog: SkillCatalogService<PostgresSkillRepository, DefaultClock>,
    /// Developer roster.
    pub roster: DeveloperRosterService<
        PostgresDeveloperRepository,
        PostgresSkillRepository,
        PostgresTaskRepository,
        DefaultClock,
    >,
    /// Task tree engine.
    pub tasks: PgTaskService,
    /// Direct access to the task repository.
    pub task_repository: Arc<PostgresTaskRepository>,
}

/// Wires every service to a fresh scratch database.
///
/// Returns `Ok(None)` when no test server is configured.
///
/// # Errors
///
/// Returns an error if the scratch database cannot be prepared.
pub fn pg_board() -> Result<Option<PgBoard>, BoxError> {
    let Some(database) = TemporaryDatabase::create()? else {
        return Ok(None);
    };
    let clock = Arc::new(DefaultClock);
    let skills = Arc::new(PostgresSkillRepository::new(database.pool()));
    let developers = Arc::new(PostgresDeveloperRepository::new(database.pool()));
    let tasks = Arc::new(PostgresTaskRepository::new(database.pool()));

    Ok(Some(PgBoard {
        catalog: SkillCatalogService::new(Arc::clone(&skills), Arc::clone(&clock)),
        roster: DeveloperRosterService::new(
            Arc::clone(&developers),
            Arc::clone(&skills),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        tasks: TaskTreeService::new(Arc::clone(&tasks), skills, developers, clock),
        task_repository: tasks,
        database,
    }))
}
