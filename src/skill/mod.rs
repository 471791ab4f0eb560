//! Skill catalog for Taskforge.
//!
//! The catalog is the authoritative set of named skills. Tasks reference
//! skills as requirements and developers reference them as capabilities. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
