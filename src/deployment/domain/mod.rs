//! Domain model for deployment orchestration.
//!
//! The deployment domain models the transient deployment request, the
//! persisted deployment record with its monotonic status, and the stale
//! timeout rule. Infrastructure concerns stay outside the domain boundary.

mod deployment;
mod error;
mod ids;
mod request;
mod status;
mod timeout;

pub use deployment::{
    Deployment, InstanceEndpoint, PendingTransition, PersistedDeploymentData,
    ProvisioningAcceptance,
};
pub use error::{
    DeploymentDomainError, DeploymentRequestError, ParseDeploymentStatusError,
    ParseRolloutKindError,
};
pub use ids::{DeploymentId, DeploymentName, InstanceId};
pub use request::{
    DeploymentOptions, DeploymentRequest, RolloutKind, TargetMode, TargetSelection,
};
pub use status::DeploymentStatus;
pub use timeout::{STALE_THRESHOLD_SECS, StaleTimeout, stale_cutoff};
