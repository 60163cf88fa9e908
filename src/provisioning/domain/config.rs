//! Provisioning configuration aggregate.

use super::{
    AccessKeyId, CloudCredentials, ConfigField, InstanceSize, KeyPairName, OperatorId,
    ProvisioningConfigError, Region, SecretAccessKey, SecurityGroupId,
};
use crate::timestamp::stored_now;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Unvalidated configuration input, as submitted by an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningConfigDraft {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    instance_size: String,
    security_group_id: Option<String>,
    key_pair_name: Option<String>,
    auto_rollout: bool,
}

impl ProvisioningConfigDraft {
    /// Creates a draft with the required credential and default fields.
    #[must_use]
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        instance_size: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            instance_size: instance_size.into(),
            security_group_id: None,
            key_pair_name: None,
            auto_rollout: false,
        }
    }

    /// Designates an existing security group for new instances.
    #[must_use]
    pub fn with_security_group_id(mut self, id: impl Into<String>) -> Self {
        self.security_group_id = Some(id.into());
        self
    }

    /// Designates an existing key pair for new instances.
    #[must_use]
    pub fn with_key_pair_name(mut self, name: impl Into<String>) -> Self {
        self.key_pair_name = Some(name.into());
        self
    }

    /// Sets the auto-rollout flag.
    #[must_use]
    pub const fn with_auto_rollout(mut self, enabled: bool) -> Self {
        self.auto_rollout = enabled;
        self
    }
}

/// Parameter object for reconstructing a persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConfigData {
    /// Owning operator account.
    pub operator_id: OperatorId,
    /// Stored credential pair.
    pub credentials: CloudCredentials,
    /// Stored default region.
    pub default_region: Region,
    /// Stored default instance size.
    pub default_instance_size: InstanceSize,
    /// Stored security group designation.
    pub security_group_id: Option<SecurityGroupId>,
    /// Stored key pair designation.
    pub key_pair_name: Option<KeyPairName>,
    /// Stored auto-rollout flag.
    pub auto_rollout: bool,
    /// Timestamp of the most recent save.
    pub updated_at: DateTime<Utc>,
}

/// The single live provisioning configuration of an operator account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningConfig {
    operator_id: OperatorId,
    credentials: CloudCredentials,
    default_region: Region,
    default_instance_size: InstanceSize,
    security_group_id: Option<SecurityGroupId>,
    key_pair_name: Option<KeyPairName>,
    auto_rollout: bool,
    updated_at: DateTime<Utc>,
}

impl ProvisioningConfig {
    /// Validates a draft into a configuration owned by `operator_id`.
    ///
    /// Fields are checked in form order (credentials, region, instance size,
    /// designated resources) and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningConfigError`] naming the offending field and the
    /// violated constraint.
    pub fn from_draft(
        operator_id: OperatorId,
        draft: ProvisioningConfigDraft,
        clock: &impl Clock,
    ) -> Result<Self, ProvisioningConfigError> {
        let ProvisioningConfigDraft {
            access_key_id,
            secret_access_key,
            region,
            instance_size,
            security_group_id,
            key_pair_name,
            auto_rollout,
        } = draft;

        let credentials = CloudCredentials::new(
            AccessKeyId::new(access_key_id)?,
            SecretAccessKey::new(secret_access_key)?,
        );
        let default_region = parse_region(&region)?;
        let default_instance_size = parse_instance_size(&instance_size)?;

        Ok(Self {
            operator_id,
            credentials,
            default_region,
            default_instance_size,
            security_group_id: SecurityGroupId::parse_optional(security_group_id)?,
            key_pair_name: KeyPairName::parse_optional(key_pair_name)?,
            auto_rollout,
            updated_at: stored_now(clock),
        })
    }

    /// Reconstructs a configuration from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedConfigData) -> Self {
        Self {
            operator_id: data.operator_id,
            credentials: data.credentials,
            default_region: data.default_region,
            default_instance_size: data.default_instance_size,
            security_group_id: data.security_group_id,
            key_pair_name: data.key_pair_name,
            auto_rollout: data.auto_rollout,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning operator account.
    #[must_use]
    pub const fn operator_id(&self) -> OperatorId {
        self.operator_id
    }

    /// Returns the credential pair.
    #[must_use]
    pub const fn credentials(&self) -> &CloudCredentials {
        &self.credentials
    }

    /// Returns the default region for new deployments.
    #[must_use]
    pub const fn default_region(&self) -> Region {
        self.default_region
    }

    /// Returns the default instance size for new deployments.
    #[must_use]
    pub const fn default_instance_size(&self) -> InstanceSize {
        self.default_instance_size
    }

    /// Returns the designated security group, if any.
    #[must_use]
    pub const fn security_group_id(&self) -> Option<&SecurityGroupId> {
        self.security_group_id.as_ref()
    }

    /// Returns the designated key pair, if any.
    #[must_use]
    pub const fn key_pair_name(&self) -> Option<&KeyPairName> {
        self.key_pair_name.as_ref()
    }

    /// Returns whether migrations roll out automatically by default.
    #[must_use]
    pub const fn auto_rollout(&self) -> bool {
        self.auto_rollout
    }

    /// Returns the timestamp of the most recent save.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn parse_region(raw: &str) -> Result<Region, ProvisioningConfigError> {
    if raw.trim().is_empty() {
        return Err(ProvisioningConfigError::Empty {
            field: ConfigField::Region,
        });
    }
    Region::try_from(raw).map_err(|_| ProvisioningConfigError::Unsupported {
        field: ConfigField::Region,
        value: raw.to_owned(),
    })
}

fn parse_instance_size(raw: &str) -> Result<InstanceSize, ProvisioningConfigError> {
    if raw.trim().is_empty() {
        return Err(ProvisioningConfigError::Empty {
            field: ConfigField::InstanceSize,
        });
    }
    InstanceSize::try_from(raw).map_err(|_| ProvisioningConfigError::Unsupported {
        field: ConfigField::InstanceSize,
        value: raw.to_owned(),
    })
}
