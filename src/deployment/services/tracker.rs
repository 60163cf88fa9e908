//! Periodic sweep that fails deployments stuck in `pending`.

use crate::deployment::{
    domain::{DeploymentId, StaleTimeout, stale_cutoff},
    ports::{DeploymentRepository, DeploymentRepositoryError, TransitionOutcome},
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Default cadence of the stale-deployment sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Service-level errors for the status tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Listing candidate deployments failed.
    #[error(transparent)]
    Repository(#[from] DeploymentRepositoryError),
}

/// Result type for status tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Outcome of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    examined: usize,
    timed_out: Vec<DeploymentId>,
    lost_race: Vec<DeploymentId>,
    unresolved: Vec<DeploymentId>,
}

impl SweepReport {
    /// Number of stale `pending` candidates examined.
    #[must_use]
    pub const fn examined(&self) -> usize {
        self.examined
    }

    /// Deployments this pass moved to `failed`.
    #[must_use]
    pub fn timed_out(&self) -> &[DeploymentId] {
        &self.timed_out
    }

    /// Deployments another writer moved out of `pending` first.
    #[must_use]
    pub fn lost_race(&self) -> &[DeploymentId] {
        &self.lost_race
    }

    /// Deployments whose conditional update failed and will be retried on
    /// the next pass.
    #[must_use]
    pub fn unresolved(&self) -> &[DeploymentId] {
        &self.unresolved
    }

    /// Returns whether the pass found nothing to do.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.examined == 0
    }
}

/// Applies the stale timeout to `pending` deployments.
///
/// The tracker keeps no state between passes: every pass re-reads the
/// candidates and re-derives elapsed time from `created_at`. Several
/// trackers, dispatchers and completion signals may run against the same
/// repository at once; the repository's conditional transition decides
/// which writer wins.
#[derive(Clone)]
pub struct DeploymentStatusTracker<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DeploymentStatusTracker<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new status tracker.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Runs a single sweep pass.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Repository`] when the candidate listing
    /// fails. Failures of individual conditional updates are recorded in
    /// [`SweepReport::unresolved`] instead.
    pub async fn reconcile_once(&self) -> TrackerResult<SweepReport> {
        let now = self.clock.utc();
        let candidates = self
            .repository
            .list_pending_created_before(stale_cutoff(now))
            .await?;

        let mut report = SweepReport {
            examined: candidates.len(),
            ..SweepReport::default()
        };

        for deployment in candidates {
            let Some(verdict) = StaleTimeout::evaluate(&deployment, now) else {
                continue;
            };
            let deployment_id = deployment.id();
            let elapsed_secs = verdict.elapsed_secs();

            match self
                .repository
                .transition_from_pending(deployment_id, &verdict.into_transition(), now)
                .await
            {
                Ok(TransitionOutcome::Applied(_)) => {
                    info!(
                        deployment_id = %deployment_id,
                        elapsed_secs,
                        "stale deployment marked failed"
                    );
                    report.timed_out.push(deployment_id);
                }
                Ok(TransitionOutcome::NotPending(current)) => {
                    debug!(
                        deployment_id = %deployment_id,
                        status = %current.status(),
                        "deployment left pending before the sweep committed"
                    );
                    report.lost_race.push(deployment_id);
                }
                Err(DeploymentRepositoryError::NotFound(_)) => {
                    debug!(deployment_id = %deployment_id, "deployment vanished during sweep");
                    report.lost_race.push(deployment_id);
                }
                Err(err) => {
                    warn!(
                        deployment_id = %deployment_id,
                        error = %err,
                        "stale deployment transition failed"
                    );
                    report.unresolved.push(deployment_id);
                }
            }
        }

        Ok(report)
    }

    /// Sweeps every `period` until `shutdown` resolves.
    ///
    /// A failed pass is logged and the loop carries on; the next pass
    /// re-reads everything it needs.
    pub async fn run<F>(&self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        // `tokio::time::interval` rejects a zero period.
        let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(period = ?period, "deployment status tracker started");
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("deployment status tracker stopping");
                    return;
                }
                _ = ticker.tick() => {
                    match self.reconcile_once().await {
                        Ok(report) if report.is_idle() => {}
                        Ok(report) => debug!(
                            examined = report.examined(),
                            timed_out = report.timed_out().len(),
                            lost_race = report.lost_race().len(),
                            unresolved = report.unresolved().len(),
                            "sweep pass complete"
                        ),
                        Err(err) => error!(error = %err, "stale deployment sweep failed"),
                    }
                }
            }
        }
    }
}
