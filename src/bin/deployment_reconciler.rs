//! Runs the stale-deployment sweep against the `PostgreSQL` store.
//!
//! Usage:
//!
//! ```text
//! deployment_reconciler [settings-path]
//! ```
//!
//! Settings come from `settings-path` (default `quillhost.toml`) overlaid
//! with `QUILLHOST_`-prefixed environment variables. The process sweeps on
//! the configured interval until it receives Ctrl-C.

use std::env;
use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use quillhost::config::{DEFAULT_SETTINGS_FILE, OrchestratorSettings};
use quillhost::deployment::adapters::postgres::{DeploymentPgPool, PostgresDeploymentRepository};
use quillhost::deployment::services::DeploymentStatusTracker;
use quillhost::telemetry::{DEFAULT_DIRECTIVE, init_tracing};
use tokio::runtime::Builder;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    init_tracing(DEFAULT_DIRECTIVE)?;

    let settings_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_owned());
    let settings = OrchestratorSettings::from_file(&settings_path)?;
    let pool = build_pool(&settings)?;
    let runtime = build_runtime()?;

    runtime.block_on(async move {
        let repository = Arc::new(PostgresDeploymentRepository::new(pool));
        let tracker = DeploymentStatusTracker::new(repository, Arc::new(DefaultClock));
        info!(
            settings = %settings_path,
            interval_secs = settings.reconciler.sweep_interval_secs,
            "deployment reconciler starting"
        );
        tracker
            .run(settings.reconciler.sweep_interval(), shutdown_signal())
            .await;
    });
    Ok(())
}

fn build_pool(settings: &OrchestratorSettings) -> Result<DeploymentPgPool, BoxError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.database.url.as_str());
    let pool = Pool::builder()
        .max_size(settings.database.max_connections)
        .build(manager)?;
    Ok(pool)
}

fn build_runtime() -> Result<tokio::runtime::Runtime, BoxError> {
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    Ok(runtime)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
