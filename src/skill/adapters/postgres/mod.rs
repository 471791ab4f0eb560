//! `PostgreSQL` adapters for skill catalog persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresSkillRepository;
