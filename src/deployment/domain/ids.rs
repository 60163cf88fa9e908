//! Identifier and validated scalar types for the deployment domain.

use super::{DeploymentDomainError, DeploymentRequestError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length of stored text fields, matching the `VARCHAR(255)` columns.
pub(super) const MAX_TEXT_LENGTH: usize = 255;

/// Identifier of a deployment, as assigned by the provisioning service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentId(Uuid);

impl DeploymentId {
    /// Creates a new random deployment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deployment identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for DeploymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for DeploymentId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable deployment name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentName(String);

impl DeploymentName {
    /// Creates a validated, trimmed deployment name.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRequestError::MissingName`] when the value is empty
    /// after trimming, or [`DeploymentRequestError::NameTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DeploymentRequestError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeploymentRequestError::MissingName);
        }
        let actual = trimmed.chars().count();
        if actual > MAX_TEXT_LENGTH {
            return Err(DeploymentRequestError::NameTooLong {
                max: MAX_TEXT_LENGTH,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DeploymentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider identifier of a compute instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Creates a validated, trimmed instance identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentDomainError::EmptyInstanceId`] when the value is
    /// empty after trimming, or [`DeploymentDomainError::InstanceIdTooLong`]
    /// when it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DeploymentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeploymentDomainError::EmptyInstanceId);
        }
        let actual = trimmed.chars().count();
        if actual > MAX_TEXT_LENGTH {
            return Err(DeploymentDomainError::InstanceIdTooLong {
                max: MAX_TEXT_LENGTH,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
