//! Task tree engine.
//!
//! Tasks are nodes of strict trees. A whole tree is created in one atomic
//! step, nodes are updated one at a time, and two rules are enforced at
//! every write: a node only becomes done once its entire subtree is done,
//! and a developer is only linked to a node whose required skills they all
//! hold. The module follows hexagonal architecture:
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
