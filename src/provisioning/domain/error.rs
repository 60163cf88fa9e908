//! Error types for provisioning configuration validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration field named by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    /// Cloud credential identifier.
    AccessKeyId,
    /// Cloud credential secret.
    SecretAccessKey,
    /// Default deployment region.
    Region,
    /// Default instance size.
    InstanceSize,
    /// Pre-existing security group identifier.
    SecurityGroupId,
    /// Pre-existing key pair name.
    KeyPairName,
}

impl ConfigField {
    /// Returns the canonical field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessKeyId => "access_key_id",
            Self::SecretAccessKey => "secret_access_key",
            Self::Region => "region",
            Self::InstanceSize => "instance_size",
            Self::SecurityGroupId => "security_group_id",
            Self::KeyPairName => "key_pair_name",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures for provisioning configuration input.
///
/// Every variant names the offending [`ConfigField`] so callers can attach the
/// message to the right form control.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisioningConfigError {
    /// The value is empty after trimming.
    #[error("{field} must not be empty")]
    Empty {
        /// Offending field.
        field: ConfigField,
    },

    /// The value is shorter than the field minimum.
    #[error("{field} must be at least {min} characters, got {actual}")]
    TooShort {
        /// Offending field.
        field: ConfigField,
        /// Minimum accepted length in characters.
        min: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// The value is longer than the field maximum.
    #[error("{field} must be at most {max} characters, got {actual}")]
    TooLong {
        /// Offending field.
        field: ConfigField,
        /// Maximum accepted length in characters.
        max: usize,
        /// Supplied length in characters.
        actual: usize,
    },

    /// The value is not part of the field's closed enumeration.
    #[error("unsupported {field} '{value}'")]
    Unsupported {
        /// Offending field.
        field: ConfigField,
        /// Supplied value.
        value: String,
    },
}

impl ProvisioningConfigError {
    /// Returns the field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> ConfigField {
        match self {
            Self::Empty { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::Unsupported { field, .. } => *field,
        }
    }
}
