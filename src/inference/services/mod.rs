//! Services that combine inference with the skill catalog.

mod resolver;

pub use resolver::SkillResolver;
