//! `PostgreSQL` adapters for provisioning configuration persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ConfigPgPool, PostgresConfigRepository};
