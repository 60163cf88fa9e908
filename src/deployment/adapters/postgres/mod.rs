//! `PostgreSQL` adapters for deployment persistence.

mod models;
mod repository;
mod schema;

pub use repository::{DeploymentPgPool, PostgresDeploymentRepository};
