//! Port contracts for provisioning configuration storage.
//!
//! Ports define infrastructure-agnostic interfaces used by provisioning
//! services.

pub mod repository;

pub use repository::{ConfigRepositoryError, ConfigRepositoryResult, ProvisioningConfigRepository};
