//! In-memory adapters for the developer roster.

mod developer;

pub use developer::InMemoryDeveloperRepository;
