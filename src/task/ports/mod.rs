//! Port contracts for the task tree engine.
//!
//! Ports define infrastructure-agnostic interfaces used by the task tree service.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
