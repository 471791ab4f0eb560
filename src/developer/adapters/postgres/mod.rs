//! `PostgreSQL` adapters for developer roster persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresDeveloperRepository;
