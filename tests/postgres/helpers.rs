//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, TimeDelta, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use quillhost::deployment::domain::{
    Deployment, DeploymentId, DeploymentName, DeploymentStatus, PersistedDeploymentData,
};
use quillhost::provisioning::domain::Region;
use quillhost::timestamp::to_stored_precision;
use uuid::Uuid;

/// Boxed error type for test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "QUILLHOST_TEST_DATABASE_URL";

/// SQL that creates the orchestration tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-03-01-000000_create_provisioning_tables/up.sql");

/// Connection pool type shared by both repositories.
pub type TestPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// A migrated schema that is dropped when the value goes out of scope.
pub struct TestSchema {
    url: String,
    name: String,
    pool: TestPool,
}

impl TestSchema {
    /// Creates and migrates a fresh schema, or returns `None` when no test
    /// database is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or migration fails.
    pub fn from_env() -> Result<Option<Self>, BoxError> {
        let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
            return Ok(None);
        };
        let name = format!("quillhost_test_{}", Uuid::new_v4().simple());

        let mut connection = PgConnection::establish(&url)?;
        connection.batch_execute(&format!(
            "CREATE SCHEMA {name}; SET search_path TO {name};"
        ))?;
        connection.batch_execute(CREATE_SCHEMA_SQL)?;

        let pool = Pool::builder()
            .max_size(4)
            .connection_customizer(Box::new(SearchPath(name.clone())))
            .build(ConnectionManager::<PgConnection>::new(url.as_str()))?;
        Ok(Some(Self { url, name, pool }))
    }

    /// Returns a handle to the schema's connection pool.
    #[must_use]
    pub fn pool(&self) -> TestPool {
        self.pool.clone()
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let dropped = connection.batch_execute(&format!(
                "DROP SCHEMA IF EXISTS {} CASCADE",
                self.name
            ));
            if let Err(err) = dropped {
                tracing::warn!(schema = %self.name, error = %err, "failed to drop test schema");
            }
        }
    }
}

/// Returns the current instant truncated to the microsecond precision
/// `PostgreSQL` stores.
#[must_use]
pub fn now_micros() -> DateTime<Utc> {
    to_stored_precision(Utc::now())
}

/// Builds a `pending` deployment created `age` before `now`.
///
/// # Panics
///
/// Panics if the fixed deployment name fails validation.
#[must_use]
pub fn pending_at(now: DateTime<Utc>, age: TimeDelta) -> Deployment {
    let created_at = now - age;
    Deployment::from_persisted(PersistedDeploymentData {
        id: DeploymentId::new(),
        name: DeploymentName::new("billing-worker").expect("valid deployment name"),
        region: Region::ApSoutheast2,
        status: DeploymentStatus::Pending,
        log: vec!["provisioning request accepted".to_owned()],
        endpoint: None,
        created_at,
        updated_at: created_at,
    })
}
