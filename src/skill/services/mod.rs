//! Application services for the skill catalog.

mod catalog;

pub use catalog::{SkillCatalogError, SkillCatalogResult, SkillCatalogService};
