//! Adapter implementations for skill catalog ports.

pub mod memory;
pub mod postgres;
