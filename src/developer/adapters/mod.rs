//! Adapter implementations for developer roster ports.

pub mod memory;
pub mod postgres;
