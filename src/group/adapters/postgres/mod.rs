//! `PostgreSQL` adapters for group persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresGroupRepository;
