//! Port for the external provisioning service.

use crate::deployment::domain::{DeploymentRequest, ProvisioningAcceptance};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for provisioning service calls.
pub type ProvisioningServiceResult<T> = Result<T, ProvisioningServiceError>;

/// Contract of the service that creates or updates cloud instances.
///
/// Submission is asynchronous: acceptance returns immediately and the final
/// outcome is reported out of band.
#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Submits a request for provisioning.
    async fn submit(
        &self,
        request: &DeploymentRequest,
    ) -> ProvisioningServiceResult<ProvisioningAcceptance>;
}

/// Errors returned by provisioning service adapters.
#[derive(Debug, Clone, Error)]
pub enum ProvisioningServiceError {
    /// The service refused the request.
    #[error("provisioning service rejected the request: {reason}")]
    Rejected {
        /// Reason reported by the service.
        reason: String,
    },

    /// The service could not be reached or answered with something other
    /// than an acceptance.
    #[error("provisioning service transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProvisioningServiceError {
    /// Creates a rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
