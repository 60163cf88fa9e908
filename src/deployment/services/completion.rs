//! Application of out-of-band completion signals from the provisioning
//! service.

use crate::deployment::{
    domain::{
        Deployment, DeploymentDomainError, DeploymentId, DeploymentStatus, InstanceEndpoint,
        PendingTransition,
    },
    ports::{DeploymentRepository, DeploymentRepositoryError, TransitionOutcome},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for completion signals.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The signal names a deployment that does not exist.
    #[error("deployment not found: {0}")]
    NotFound(DeploymentId),
    /// The signal carried invalid data.
    #[error(transparent)]
    Domain(#[from] DeploymentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(DeploymentRepositoryError),
}

impl From<DeploymentRepositoryError> for CompletionError {
    fn from(err: DeploymentRepositoryError) -> Self {
        match err {
            DeploymentRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// What happened to a completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The deployment was `pending` and now reflects the signal.
    Applied(Deployment),
    /// The deployment had already reached a terminal status; the signal was
    /// ignored and the record is returned unchanged.
    AlreadyTerminal(Deployment),
}

impl CompletionOutcome {
    /// Returns the deployment as it stands after the signal.
    #[must_use]
    pub const fn deployment(&self) -> &Deployment {
        match self {
            Self::Applied(deployment) | Self::AlreadyTerminal(deployment) => deployment,
        }
    }
}

/// Records `running` and `failed` signals against pending deployments.
///
/// A signal never overwrites a terminal status. In particular a success
/// reported after the stale sweep failed the deployment is dropped with a
/// warning: the operator has already been told it failed.
#[derive(Clone)]
pub struct DeploymentCompletionService<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DeploymentCompletionService<R, C>
where
    R: DeploymentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new completion service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records that the instance for `deployment_id` came up.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Domain`] for a blank instance id or
    /// address, [`CompletionError::NotFound`] for an unknown deployment, or
    /// [`CompletionError::Repository`] when persistence fails.
    pub async fn mark_running(
        &self,
        deployment_id: DeploymentId,
        instance_id: impl Into<String> + Send,
        public_address: impl Into<String> + Send,
        log_line: Option<String>,
    ) -> CompletionResult<CompletionOutcome> {
        let endpoint = InstanceEndpoint::new(instance_id, public_address)?;
        let transition = PendingTransition::Running {
            endpoint,
            log_entry: non_blank(log_line),
        };
        self.apply(deployment_id, &transition).await
    }

    /// Records that provisioning for `deployment_id` failed.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Domain`] for a blank log line,
    /// [`CompletionError::NotFound`] for an unknown deployment, or
    /// [`CompletionError::Repository`] when persistence fails.
    pub async fn mark_failed(
        &self,
        deployment_id: DeploymentId,
        log_line: impl Into<String> + Send,
    ) -> CompletionResult<CompletionOutcome> {
        let log_entry =
            non_blank(Some(log_line.into())).ok_or(DeploymentDomainError::EmptyLogEntry)?;
        let transition = PendingTransition::Failed { log_entry };
        self.apply(deployment_id, &transition).await
    }

    async fn apply(
        &self,
        deployment_id: DeploymentId,
        transition: &PendingTransition,
    ) -> CompletionResult<CompletionOutcome> {
        let at = self.clock.utc();
        let target = transition.target();
        match self
            .repository
            .transition_from_pending(deployment_id, transition, at)
            .await?
        {
            TransitionOutcome::Applied(deployment) => {
                info!(deployment_id = %deployment_id, status = %target, "deployment completed");
                Ok(CompletionOutcome::Applied(deployment))
            }
            TransitionOutcome::NotPending(deployment) => {
                if target == DeploymentStatus::Running
                    && deployment.status() == DeploymentStatus::Failed
                {
                    warn!(
                        deployment_id = %deployment_id,
                        "late success ignored; deployment already failed"
                    );
                } else {
                    info!(
                        deployment_id = %deployment_id,
                        status = %deployment.status(),
                        signalled = %target,
                        "completion signal ignored for terminal deployment"
                    );
                }
                Ok(CompletionOutcome::AlreadyTerminal(deployment))
            }
        }
    }
}

fn non_blank(line: Option<String>) -> Option<String> {
    line.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
