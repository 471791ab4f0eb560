//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforge::developer::{
    adapters::memory::InMemoryDeveloperRepository, domain::DeveloperId,
    services::DeveloperRosterService,
};
use taskforge::skill::{
    adapters::memory::InMemorySkillRepository, domain::SkillId, services::SkillCatalogService,
};
use taskforge::task::{adapters::memory::InMemoryTaskRepository, services::TaskTreeService};
use tracing_subscriber::EnvFilter;

/// Task tree service wired to memory adapters.
pub type TestTaskService = TaskTreeService<
    InMemoryTaskRepository,
    InMemorySkillRepository,
    InMemoryDeveloperRepository,
    DefaultClock,
>;

/// Developer roster service wired to memory adapters.
pub type TestRosterService = DeveloperRosterService<
    InMemoryDeveloperRepository,
    InMemorySkillRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;

/// Skill catalog service wired to memory adapters.
pub type TestCatalogService = SkillCatalogService<InMemorySkillRepository, DefaultClock>;

/// All services of one board, sharing the same stores.
pub struct Board {
    /// Skill catalog.
    pub catalog: TestCatalogService,
    /// Developer roster.
    pub roster: TestRosterService,
    /// Task tree engine.
    pub tasks: TestTaskService,
}

impl Board {
    /// Registers a skill and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics when registration fails.
    pub async fn skill(&self, name: &str) -> SkillId {
        self.catalog
            .register(name)
            .await
            .expect("skill registration")
            .id()
    }

    /// Registers a developer holding `skills` and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics when registration fails.
    pub async fn developer(&self, name: &str, skills: &[SkillId]) -> DeveloperId {
        self.roster
            .register(name, skills)
            .await
            .expect("developer registration")
            .developer
            .id()
    }
}

/// Routes service logs to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .is_ok();
}

/// Provides a fresh board backed by empty memory stores.
#[fixture]
pub fn board() -> Board {
    init_tracing();
    let clock = Arc::new(DefaultClock);
    let skills = Arc::new(InMemorySkillRepository::new());
    let developers = Arc::new(InMemoryDeveloperRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());

    Board {
        catalog: SkillCatalogService::new(Arc::clone(&skills), Arc::clone(&clock)),
        roster: DeveloperRosterService::new(
            Arc::clone(&developers),
            Arc::clone(&skills),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        tasks: TaskTreeService::new(tasks, skills, developers, clock),
    }
}
