//! Port contracts for deployment orchestration.
//!
//! Ports define infrastructure-agnostic interfaces used by deployment
//! services.

pub mod provisioning;
pub mod repository;

pub use provisioning::{ProvisioningService, ProvisioningServiceError, ProvisioningServiceResult};
pub use repository::{
    DeploymentRepository, DeploymentRepositoryError, DeploymentRepositoryResult,
    TransitionOutcome,
};
