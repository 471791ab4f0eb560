//! Port contracts for the developer roster.

pub mod repository;

pub use repository::{DeveloperRepository, DeveloperRepositoryError, DeveloperRepositoryResult};
