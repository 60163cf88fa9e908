//! Shared world state for stale deployment sweep BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use quillhost::deployment::{
    adapters::memory::InMemoryDeploymentRepository,
    domain::Deployment,
    services::{DeploymentCompletionService, DeploymentStatusTracker, SweepReport},
};
use rstest::fixture;

/// Scenario world for sweep behaviour tests.
pub struct SweepWorld {
    pub repository: Arc<InMemoryDeploymentRepository>,
    pub tracker: DeploymentStatusTracker<InMemoryDeploymentRepository, DefaultClock>,
    pub completion: DeploymentCompletionService<InMemoryDeploymentRepository, DefaultClock>,
    pub seeded: Option<Deployment>,
    pub last_report: Option<SweepReport>,
}

impl SweepWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryDeploymentRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            tracker: DeploymentStatusTracker::new(repository.clone(), clock.clone()),
            completion: DeploymentCompletionService::new(repository.clone(), clock),
            repository,
            seeded: None,
            last_report: None,
        }
    }

    /// Returns the deployment seeded by a `Given` step.
    ///
    /// # Errors
    ///
    /// Returns an error when no deployment was seeded.
    pub fn seeded(&self) -> Result<&Deployment, eyre::Report> {
        self.seeded
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing seeded deployment in scenario world"))
    }
}

impl Default for SweepWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SweepWorld {
    SweepWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
