//! `PostgreSQL` adapters for task tree persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
