//! Step definitions for task completion scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
