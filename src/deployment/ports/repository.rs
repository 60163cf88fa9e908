//! Repository port for deployment persistence and conditional transitions.

use crate::deployment::domain::{Deployment, DeploymentId, PendingTransition};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for deployment repository operations.
pub type DeploymentRepositoryResult<T> = Result<T, DeploymentRepositoryError>;

/// Outcome of a conditional transition out of `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The deployment was still `pending` and now holds the new status.
    Applied(Deployment),
    /// Another writer moved the deployment out of `pending` first; the
    /// current, unchanged record is returned.
    NotPending(Deployment),
}

impl TransitionOutcome {
    /// Returns the deployment as it stands after the attempt.
    #[must_use]
    pub const fn deployment(&self) -> &Deployment {
        match self {
            Self::Applied(deployment) | Self::NotPending(deployment) => deployment,
        }
    }

    /// Returns whether this attempt committed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Deployment persistence contract.
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Stores a newly dispatched deployment.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRepositoryError::DuplicateDeployment`] when the
    /// identifier already exists.
    async fn store(&self, deployment: &Deployment) -> DeploymentRepositoryResult<()>;

    /// Finds a deployment by identifier.
    ///
    /// Returns `None` when the deployment does not exist.
    async fn find_by_id(&self, id: DeploymentId) -> DeploymentRepositoryResult<Option<Deployment>>;

    /// Returns up to `limit` deployments, newest first.
    async fn list_recent(&self, limit: usize) -> DeploymentRepositoryResult<Vec<Deployment>>;

    /// Returns every `pending` deployment created strictly before `cutoff`,
    /// oldest first.
    async fn list_pending_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<Vec<Deployment>>;

    /// Applies `transition` only if the deployment is still `pending` at
    /// write time.
    ///
    /// Implementations must perform the status check and the write as one
    /// atomic step (`UPDATE ... WHERE status = 'pending'`), never as a read
    /// followed by an unconditional write.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRepositoryError::NotFound`] when the deployment
    /// does not exist.
    async fn transition_from_pending(
        &self,
        id: DeploymentId,
        transition: &PendingTransition,
        at: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<TransitionOutcome>;
}

/// Errors returned by deployment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DeploymentRepositoryError {
    /// A deployment with the same identifier already exists.
    #[error("duplicate deployment identifier: {0}")]
    DuplicateDeployment(DeploymentId),

    /// The deployment was not found.
    #[error("deployment not found: {0}")]
    NotFound(DeploymentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeploymentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
