//! Error types for deployment domain validation and parsing.

use super::{DeploymentId, DeploymentStatus};
use thiserror::Error;

/// User-correctable failures while building a deployment request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeploymentRequestError {
    /// The operator has not saved any provisioning credentials.
    #[error("no provisioning credentials are configured")]
    MissingCredentials,

    /// The deployment name is empty after trimming.
    #[error("deployment name must not be empty")]
    MissingName,

    /// The deployment name exceeds the storage limit.
    #[error("deployment name must be at most {max} characters, got {actual}")]
    NameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// An existing-instance deployment did not name its target instance.
    #[error("an existing-instance deployment requires an instance id")]
    MissingInstanceTarget,

    /// The target instance id exceeds the storage limit.
    #[error("target instance id must be at most {max} characters, got {actual}")]
    InstanceTargetTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },
}

/// Errors raised by deployment lifecycle rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeploymentDomainError {
    /// The deployment has already left `pending`.
    #[error("deployment {deployment_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Deployment identifier.
        deployment_id: DeploymentId,
        /// Current status.
        from: DeploymentStatus,
        /// Requested status.
        to: DeploymentStatus,
    },

    /// An instance identifier is empty after trimming.
    #[error("instance id must not be empty")]
    EmptyInstanceId,

    /// An instance identifier exceeds the storage limit.
    #[error("instance id must be at most {max} characters, got {actual}")]
    InstanceIdTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// A public address is empty after trimming.
    #[error("public address must not be empty")]
    EmptyPublicAddress,

    /// A public address exceeds the storage limit.
    #[error("public address must be at most {max} characters, got {actual}")]
    PublicAddressTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// A log entry is empty after trimming.
    #[error("log entry must not be empty")]
    EmptyLogEntry,
}

/// Error returned while parsing deployment status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown deployment status: {0}")]
pub struct ParseDeploymentStatusError(pub String);

/// Error returned while parsing rollout kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown rollout kind: {0}")]
pub struct ParseRolloutKindError(pub String);
