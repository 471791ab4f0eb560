//! Domain model for the developer roster.

mod developer;
mod error;
mod ids;

pub use developer::{AssignedTaskSummary, Developer, DeveloperProfile, PersistedDeveloperData};
pub use error::DeveloperDomainError;
pub use ids::{DeveloperId, DeveloperName};
