//! Identifier types for the provisioning domain.

use super::{ConfigField, ProvisioningConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum length of an operator-designated resource identifier, matching the
/// `VARCHAR(255)` columns.
const MAX_RESOURCE_ID_LENGTH: usize = 255;

/// Unique identifier for an operator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(Uuid);

impl OperatorId {
    /// Creates a new random operator identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an operator identifier from an existing UUID.
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

impl Default for OperatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trims an optional designated resource identifier.
///
/// Blank input means "not designated" and yields `None`.
fn designated_resource(
    field: ConfigField,
    value: Option<String>,
) -> Result<Option<String>, ProvisioningConfigError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_RESOURCE_ID_LENGTH {
        return Err(ProvisioningConfigError::TooLong {
            field,
            max: MAX_RESOURCE_ID_LENGTH,
            actual,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Pre-existing network security boundary designated by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityGroupId(String);

impl SecurityGroupId {
    /// Parses an optional operator-supplied security group identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningConfigError::TooLong`] when the trimmed value
    /// exceeds 255 characters.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, ProvisioningConfigError> {
        Ok(designated_resource(ConfigField::SecurityGroupId, value)?.map(Self))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pre-existing access credential (key pair) designated by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPairName(String);

impl KeyPairName {
    /// Parses an optional operator-supplied key pair name.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningConfigError::TooLong`] when the trimmed value
    /// exceeds 255 characters.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, ProvisioningConfigError> {
        Ok(designated_resource(ConfigField::KeyPairName, value)?.map(Self))
    }

    /// Returns the key pair name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPairName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
