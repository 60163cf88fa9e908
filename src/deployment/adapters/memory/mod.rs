//! In-memory adapters for deployment orchestration tests.

mod deployment;
mod provisioning;

pub use deployment::InMemoryDeploymentRepository;
pub use provisioning::{InMemoryProvisioningService, ScriptedResponse};
