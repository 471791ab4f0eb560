//! Taskforge: skill-aware task assignment with hierarchical subtasks.
//!
//! This crate provides the consistency engine behind a task board where every
//! task node demands a set of skills and may only be handed to developers who
//! hold all of them. Tasks form trees: a parent can only be completed once its
//! whole subtree is done.
//!
//! # Architecture
//!
//! Taskforge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`skill`]: Skill catalog
//! - [`developer`]: Developer roster and skill sets
//! - [`task`]: Task tree engine and assignment validation
//! - [`inference`]: Best-effort skill inference from task titles
//! - [`config`]: Runtime configuration

pub mod config;
pub mod developer;
pub mod inference;
pub mod skill;
pub mod task;
