//! Domain model for operator provisioning configuration.
//!
//! The provisioning domain models validated cloud credentials, the closed set
//! of supported regions and instance sizes, and the single live configuration
//! aggregate per operator account.

mod catalog;
mod config;
mod credentials;
mod error;
mod ids;

pub use catalog::{InstanceSize, Region, UnknownInstanceSizeError, UnknownRegionError};
pub use config::{PersistedConfigData, ProvisioningConfig, ProvisioningConfigDraft};
pub use credentials::{AccessKeyId, CloudCredentials, SecretAccessKey};
pub use error::{ConfigField, ProvisioningConfigError};
pub use ids::{KeyPairName, OperatorId, SecurityGroupId};
