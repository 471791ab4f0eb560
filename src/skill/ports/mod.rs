//! Port contracts for the skill catalog.

pub mod repository;

pub use repository::{SkillRepository, SkillRepositoryError, SkillRepositoryResult};
