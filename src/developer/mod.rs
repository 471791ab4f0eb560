//! Developer roster for Taskforge.
//!
//! Developers hold skills from the catalog and may be assigned to task
//! nodes whose required skills they all hold. Profiles returned by the
//! roster include the resolved skills and the tasks currently assigned.
//! The module follows hexagonal architecture:
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
