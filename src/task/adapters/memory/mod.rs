//! In-memory adapters for the task tree engine.

mod task;

pub use task::InMemoryTaskRepository;
