//! Dispatch of deployment requests to the provisioning service.

use crate::config::ProvisioningSettings;
use crate::deployment::{
    domain::{Deployment, DeploymentId, DeploymentRequest, DeploymentStatus},
    ports::{
        DeploymentRepository, DeploymentRepositoryError, ProvisioningService,
        ProvisioningServiceError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Upper bound on a single provisioning-service call.
///
/// Independent of the staleness threshold, which governs how long an
/// accepted deployment may stay `pending`.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Service-level errors for dispatch. None of them leave a persisted record.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The provisioning service refused the request.
    #[error("provisioning service rejected the request: {reason}")]
    Rejected {
        /// Reason reported by the service.
        reason: String,
    },

    /// The provisioning service could not be reached.
    #[error("provisioning service unavailable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The provisioning service did not answer within the dispatch timeout.
    #[error("provisioning service did not answer within {}s", timeout.as_secs())]
    TimedOut {
        /// Timeout that elapsed.
        timeout: Duration,
    },

    /// The request was accepted but the pending record could not be stored.
    #[error(transparent)]
    Repository(#[from] DeploymentRepositoryError),
}

impl From<ProvisioningServiceError> for DispatchError {
    fn from(err: ProvisioningServiceError) -> Self {
        match err {
            ProvisioningServiceError::Rejected { reason } => Self::Rejected { reason },
            ProvisioningServiceError::Transport(source) => Self::Transport(source),
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Handle to a dispatched deployment, as first persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentHandle {
    deployment: Deployment,
}

impl DeploymentHandle {
    /// Returns the provider-assigned identifier.
    #[must_use]
    pub const fn deployment_id(&self) -> DeploymentId {
        self.deployment.id()
    }

    /// Returns the status at dispatch time, always `pending`.
    #[must_use]
    pub const fn status(&self) -> DeploymentStatus {
        self.deployment.status()
    }

    /// Returns the persisted record.
    #[must_use]
    pub const fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Consumes the handle, returning the persisted record.
    #[must_use]
    pub fn into_deployment(self) -> Deployment {
        self.deployment
    }
}

/// Submits validated requests and records accepted ones as `pending`.
#[derive(Clone)]
pub struct DeploymentDispatcher<R, P, C>
where
    R: DeploymentRepository,
    P: ProvisioningService,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    provisioning: Arc<P>,
    clock: Arc<C>,
    timeout: Duration,
}

impl<R, P, C> DeploymentDispatcher<R, P, C>
where
    R: DeploymentRepository,
    P: ProvisioningService,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher using [`DEFAULT_DISPATCH_TIMEOUT`].
    #[must_use]
    pub const fn new(repository: Arc<R>, provisioning: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            provisioning,
            clock,
            timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }

    /// Overrides the dispatch timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Applies the dispatch timeout from the `[provisioning]` settings
    /// section.
    #[must_use]
    pub const fn with_settings(self, settings: &ProvisioningSettings) -> Self {
        self.with_timeout(settings.dispatch_timeout())
    }

    /// Returns the dispatch timeout in force.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Submits `request` and, on acceptance, persists a `pending` record.
    ///
    /// The acceptance is trusted only for the deployment identifier and the
    /// initial log line; every other field comes from `request`. Failed
    /// dispatches persist nothing and may be retried with the same request.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Rejected`], [`DispatchError::Transport`] or
    /// [`DispatchError::TimedOut`] when the service does not accept the
    /// request, and [`DispatchError::Repository`] when the accepted
    /// deployment cannot be stored.
    pub async fn dispatch(&self, request: &DeploymentRequest) -> DispatchResult<DeploymentHandle> {
        let submission =
            tokio::time::timeout(self.timeout, self.provisioning.submit(request)).await;
        let acceptance = match submission {
            Ok(Ok(acceptance)) => acceptance,
            Ok(Err(err)) => {
                warn!(name = %request.name(), error = %err, "deployment dispatch not accepted");
                return Err(err.into());
            }
            Err(_elapsed) => {
                warn!(
                    name = %request.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "deployment dispatch timed out"
                );
                return Err(DispatchError::TimedOut {
                    timeout: self.timeout,
                });
            }
        };

        let deployment = Deployment::new_pending(&acceptance, request, &*self.clock);
        self.repository.store(&deployment).await?;
        info!(
            deployment_id = %deployment.id(),
            name = %deployment.name(),
            region = %deployment.region(),
            target_mode = request.target().as_str(),
            "deployment dispatched"
        );
        Ok(DeploymentHandle { deployment })
    }
}
