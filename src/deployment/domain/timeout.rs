//! Stale-deployment timeout rule.
//!
//! A deployment still `pending` more than [`STALE_THRESHOLD_SECS`] after
//! creation is presumed abandoned. Marking it `failed` is a liveness decision
//! taken locally ("we stopped waiting"), not a claim about the remote
//! instance, and the log entry says so.

use super::{Deployment, DeploymentStatus, PendingTransition};
use chrono::{DateTime, TimeDelta, Utc};

/// Seconds a deployment may stay `pending` before the sweep fails it.
pub const STALE_THRESHOLD_SECS: i64 = 180;

fn stale_threshold() -> TimeDelta {
    TimeDelta::seconds(STALE_THRESHOLD_SECS)
}

/// Returns the creation instant before which a `pending` deployment is stale
/// at `now`.
#[must_use]
pub fn stale_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - stale_threshold()
}

/// Verdict that a pending deployment exceeded the staleness threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleTimeout {
    elapsed: TimeDelta,
}

impl StaleTimeout {
    /// Evaluates the timeout rule for `deployment` at `now`.
    ///
    /// Elapsed time is always re-derived from `created_at`, so evaluating the
    /// same record twice yields the same verdict.
    #[must_use]
    pub fn evaluate(deployment: &Deployment, now: DateTime<Utc>) -> Option<Self> {
        if deployment.status() != DeploymentStatus::Pending {
            return None;
        }
        let elapsed = now - deployment.created_at();
        (elapsed > stale_threshold()).then_some(Self { elapsed })
    }

    /// Returns the time the deployment spent pending.
    #[must_use]
    pub const fn elapsed(&self) -> TimeDelta {
        self.elapsed
    }

    /// Returns the elapsed time in whole seconds, rounded up.
    ///
    /// A verdict always exceeds the threshold, so the reported figure never
    /// equals [`STALE_THRESHOLD_SECS`].
    #[must_use]
    pub fn elapsed_secs(&self) -> i64 {
        let whole = self.elapsed.num_seconds();
        if self.elapsed.subsec_nanos() > 0 {
            whole.saturating_add(1)
        } else {
            whole
        }
    }

    /// Renders the diagnostic log entry appended on transition.
    #[must_use]
    pub fn log_entry(&self) -> String {
        format!(
            "timed out after {}s; automatically marked as failed due to timeout (threshold {}s)",
            self.elapsed_secs(),
            STALE_THRESHOLD_SECS
        )
    }

    /// Converts the verdict into the conditional `pending → failed`
    /// transition.
    #[must_use]
    pub fn into_transition(self) -> PendingTransition {
        PendingTransition::Failed {
            log_entry: self.log_entry(),
        }
    }
}
