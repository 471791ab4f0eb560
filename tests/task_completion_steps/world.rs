//! Shared world state for task completion BDD scenarios.

use std::collections::HashMap;
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
use taskforge::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskId, TaskNode},
    services::{TaskTreeError, TaskTreeService},
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskTreeService<
    InMemoryTaskRepository,
    InMemorySkillRepository,
    InMemoryDeveloperRepository,
    DefaultClock,
>;

/// Scenario world for task completion behaviour tests.
pub struct TaskBoardWorld {
    pub catalog: SkillCatalogService<InMemorySkillRepository, DefaultClock>,
    pub roster: DeveloperRosterService<
        InMemoryDeveloperRepository,
        InMemorySkillRepository,
        InMemoryTaskRepository,
        DefaultClock,
    >,
    pub service: TestTaskService,
    pub skills: HashMap<String, SkillId>,
    pub developers: HashMap<String, DeveloperId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_update_result: Option<Result<TaskNode, TaskTreeError>>,
}

impl TaskBoardWorld {
    /// Creates a world over empty memory stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let skills = Arc::new(InMemorySkillRepository::new());
        let developers = Arc::new(InMemoryDeveloperRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());

        Self {
            catalog: SkillCatalogService::new(Arc::clone(&skills), Arc::clone(&clock)),
            roster: DeveloperRosterService::new(
                Arc::clone(&developers),
                Arc::clone(&skills),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            service: TaskTreeService::new(tasks, skills, developers, clock),
            skills: HashMap::new(),
            developers: HashMap::new(),
            tasks: HashMap::new(),
            last_update_result: None,
        }
    }

    /// Resolves a comma-separated list of skill names registered earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if any name was not registered in the scenario.
    pub fn skill_ids(&self, names: &str) -> Result<Vec<SkillId>, eyre::Report> {
        names
            .split(',')
            .map(str::trim)
            .map(|name| {
                self.skills
                    .get(name)
                    .copied()
                    .ok_or_else(|| eyre::eyre!("skill {name:?} not registered in scenario"))
            })
            .collect()
    }

    /// Looks up a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with that title was created.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("task {title:?} not created in scenario"))
    }

    /// Looks up a developer registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no developer with that name was registered.
    pub fn developer_id(&self, name: &str) -> Result<DeveloperId, eyre::Report> {
        self.developers
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("developer {name:?} not registered in scenario"))
    }

    /// Records every node of a created tree by title.
    pub fn remember(&mut self, node: &TaskNode) {
        self.tasks.insert(node.title.to_string(), node.id);
        for child in &node.subtasks {
            self.remember(child);
        }
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
