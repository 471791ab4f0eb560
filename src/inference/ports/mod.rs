//! Port contracts for skill inference.

mod inference;

#[cfg(test)]
pub use inference::MockSkillInference;
pub use inference::SkillInference;
