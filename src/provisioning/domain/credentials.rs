//! Validated cloud credential pair.
//!
//! Both halves of the pair are held in [`SecretString`] so they never appear
//! in `Debug` output or logs. Callers that genuinely need the raw value (the
//! persistence adapter) go through [`ExposeSecret`].

use super::{ConfigField, ProvisioningConfigError};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

const ACCESS_KEY_ID_MIN: usize = 16;
const SECRET_ACCESS_KEY_MIN: usize = 40;
const CREDENTIAL_MAX: usize = 128;

fn validate_length(
    field: ConfigField,
    raw: &str,
    min: usize,
) -> Result<String, ProvisioningConfigError> {
    let trimmed = raw.trim();
    let actual = trimmed.chars().count();
    if actual == 0 {
        return Err(ProvisioningConfigError::Empty { field });
    }
    if actual < min {
        return Err(ProvisioningConfigError::TooShort { field, min, actual });
    }
    if actual > CREDENTIAL_MAX {
        return Err(ProvisioningConfigError::TooLong {
            field,
            max: CREDENTIAL_MAX,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}

/// Cloud credential identifier (16 to 128 characters).
pub struct AccessKeyId(SecretString);

impl AccessKeyId {
    /// Creates a validated access key identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningConfigError`] naming
    /// [`ConfigField::AccessKeyId`] when the trimmed value is empty, shorter
    /// than 16 characters, or longer than 128 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProvisioningConfigError> {
        let raw = value.into();
        let validated = validate_length(ConfigField::AccessKeyId, &raw, ACCESS_KEY_ID_MIN)?;
        Ok(Self(SecretString::from(validated)))
    }
}

impl ExposeSecret<str> for AccessKeyId {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for AccessKeyId {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.0.expose_secret().to_owned()))
    }
}

impl PartialEq for AccessKeyId {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for AccessKeyId {}

impl fmt::Debug for AccessKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKeyId([REDACTED])")
    }
}

/// Cloud credential secret (40 to 128 characters).
pub struct SecretAccessKey(SecretString);

impl SecretAccessKey {
    /// Creates a validated secret access key.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningConfigError`] naming
    /// [`ConfigField::SecretAccessKey`] when the trimmed value is empty,
    /// shorter than 40 characters, or longer than 128 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProvisioningConfigError> {
        let raw = value.into();
        let validated =
            validate_length(ConfigField::SecretAccessKey, &raw, SECRET_ACCESS_KEY_MIN)?;
        Ok(Self(SecretString::from(validated)))
    }
}

impl ExposeSecret<str> for SecretAccessKey {
    fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretAccessKey {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.0.expose_secret().to_owned()))
    }
}

impl PartialEq for SecretAccessKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for SecretAccessKey {}

impl fmt::Debug for SecretAccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretAccessKey([REDACTED])")
    }
}

/// Credential pair used by the provisioning service to act on the operator's
/// cloud account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudCredentials {
    access_key_id: AccessKeyId,
    secret_access_key: SecretAccessKey,
}

impl CloudCredentials {
    /// Pairs a validated identifier with its secret.
    #[must_use]
    pub const fn new(access_key_id: AccessKeyId, secret_access_key: SecretAccessKey) -> Self {
        Self {
            access_key_id,
            secret_access_key,
        }
    }

    /// Returns the credential identifier.
    #[must_use]
    pub const fn access_key_id(&self) -> &AccessKeyId {
        &self.access_key_id
    }

    /// Returns the credential secret.
    #[must_use]
    pub const fn secret_access_key(&self) -> &SecretAccessKey {
        &self.secret_access_key
    }
}
