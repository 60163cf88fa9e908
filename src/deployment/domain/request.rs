//! Deployment request model and the rules that derive it from user choices.
//!
//! [`DeploymentRequest::build`] is a pure function of the operator's
//! [`DeploymentOptions`] and stored [`ProvisioningConfig`]. It applies, in
//! order:
//!
//! 1. a configuration must exist ([`DeploymentRequestError::MissingCredentials`]);
//! 2. the name must be non-blank ([`DeploymentRequestError::MissingName`]);
//! 3. an existing-instance target must name its instance
//!    ([`DeploymentRequestError::MissingInstanceTarget`]) within the storage
//!    limit ([`DeploymentRequestError::InstanceTargetTooLong`]);
//! 4. existing-instance targets never auto-create supporting resources;
//! 5. new-instance targets auto-create a resource only when the configuration
//!    does not already designate one;
//! 6. database initialisation survives only on fresh rollouts.

use super::{
    DeploymentDomainError, DeploymentName, DeploymentRequestError, InstanceId,
    ParseRolloutKindError,
};
use crate::provisioning::domain::{
    InstanceSize, KeyPairName, ProvisioningConfig, Region, SecurityGroupId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a deployment reinitialises state or updates in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutKind {
    /// Wipe and reinitialise.
    Fresh,
    /// Update in place, preserving data.
    Incremental,
}

impl RolloutKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Incremental => "incremental",
        }
    }
}

impl fmt::Display for RolloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RolloutKind {
    type Error = ParseRolloutKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "fresh" => Ok(Self::Fresh),
            "incremental" => Ok(Self::Incremental),
            _ => Err(ParseRolloutKindError(value.to_owned())),
        }
    }
}

/// Raw target choice as captured from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// Provision a new instance.
    NewInstance,
    /// Update an instance that already exists; the id may not have been
    /// filled in yet.
    ExistingInstance(Option<String>),
}

/// Validated deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMode {
    /// Provision a new instance.
    NewInstance,
    /// Update the named existing instance.
    ExistingInstance(InstanceId),
}

impl TargetMode {
    /// Returns the canonical wire representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewInstance => "new_instance",
            Self::ExistingInstance(_) => "existing_instance",
        }
    }

    /// Returns the targeted instance for existing-instance deployments.
    #[must_use]
    pub const fn existing_instance_id(&self) -> Option<&InstanceId> {
        match self {
            Self::NewInstance => None,
            Self::ExistingInstance(instance_id) => Some(instance_id),
        }
    }
}

/// Operator choices for a deployment, before any rule is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOptions {
    name: String,
    rollout_kind: RolloutKind,
    target: TargetSelection,
    region: Option<Region>,
    instance_size: Option<InstanceSize>,
    include_migrations: Option<bool>,
    initialize_database: bool,
    auto_create_security_boundary: bool,
    auto_create_access_credential: bool,
}

impl DeploymentOptions {
    /// Creates options for a new-instance deployment with every toggle off.
    #[must_use]
    pub fn new(name: impl Into<String>, rollout_kind: RolloutKind) -> Self {
        Self {
            name: name.into(),
            rollout_kind,
            target: TargetSelection::NewInstance,
            region: None,
            instance_size: None,
            include_migrations: None,
            initialize_database: false,
            auto_create_security_boundary: false,
            auto_create_access_credential: false,
        }
    }

    /// Sets the target selection.
    #[must_use]
    pub fn with_target(mut self, target: TargetSelection) -> Self {
        self.target = target;
        self
    }

    /// Targets an existing instance.
    #[must_use]
    pub fn with_existing_instance(self, instance_id: impl Into<String>) -> Self {
        self.with_target(TargetSelection::ExistingInstance(Some(instance_id.into())))
    }

    /// Overrides the configured default region.
    #[must_use]
    pub const fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Overrides the configured default instance size.
    #[must_use]
    pub const fn with_instance_size(mut self, instance_size: InstanceSize) -> Self {
        self.instance_size = Some(instance_size);
        self
    }

    /// Sets migration inclusion explicitly instead of inheriting the
    /// configured auto-rollout flag.
    #[must_use]
    pub const fn with_migrations(mut self, include: bool) -> Self {
        self.include_migrations = Some(include);
        self
    }

    /// Requests database initialisation.
    #[must_use]
    pub const fn with_database_initialization(mut self, initialize: bool) -> Self {
        self.initialize_database = initialize;
        self
    }

    /// Requests creation of a new security boundary.
    #[must_use]
    pub const fn with_auto_create_security_boundary(mut self, enabled: bool) -> Self {
        self.auto_create_security_boundary = enabled;
        self
    }

    /// Requests creation of a new access credential.
    #[must_use]
    pub const fn with_auto_create_access_credential(mut self, enabled: bool) -> Self {
        self.auto_create_access_credential = enabled;
        self
    }
}

/// Immutable, fully-resolved deployment request handed to the provisioning
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    name: DeploymentName,
    region: Region,
    instance_size: InstanceSize,
    rollout_kind: RolloutKind,
    target: TargetMode,
    include_migrations: bool,
    initialize_database: bool,
    auto_create_security_boundary: bool,
    auto_create_access_credential: bool,
    security_group_id: Option<SecurityGroupId>,
    key_pair_name: Option<KeyPairName>,
}

impl DeploymentRequest {
    /// Derives a request from operator options and the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRequestError::MissingCredentials`] when `config` is
    /// `None`, [`DeploymentRequestError::MissingName`] or
    /// [`DeploymentRequestError::NameTooLong`] for an invalid name, and
    /// [`DeploymentRequestError::MissingInstanceTarget`] when an
    /// existing-instance target has no instance id.
    pub fn build(
        options: DeploymentOptions,
        config: Option<&ProvisioningConfig>,
    ) -> Result<Self, DeploymentRequestError> {
        let stored = config.ok_or(DeploymentRequestError::MissingCredentials)?;
        let DeploymentOptions {
            name: raw_name,
            rollout_kind,
            target: selection,
            region,
            instance_size,
            include_migrations,
            initialize_database,
            auto_create_security_boundary: wants_security_boundary,
            auto_create_access_credential: wants_access_credential,
        } = options;

        let name = DeploymentName::new(raw_name)?;
        let target = resolve_target(selection)?;

        let (auto_create_security_boundary, auto_create_access_credential) = match target {
            TargetMode::ExistingInstance(_) => (false, false),
            TargetMode::NewInstance => (
                wants_security_boundary && stored.security_group_id().is_none(),
                wants_access_credential && stored.key_pair_name().is_none(),
            ),
        };
        let (security_group_id, key_pair_name) = match target {
            TargetMode::ExistingInstance(_) => (None, None),
            TargetMode::NewInstance => (
                stored.security_group_id().cloned(),
                stored.key_pair_name().cloned(),
            ),
        };

        Ok(Self {
            name,
            region: region.unwrap_or_else(|| stored.default_region()),
            instance_size: instance_size.unwrap_or_else(|| stored.default_instance_size()),
            rollout_kind,
            target,
            include_migrations: include_migrations.unwrap_or_else(|| stored.auto_rollout()),
            initialize_database: initialize_database && rollout_kind == RolloutKind::Fresh,
            auto_create_security_boundary,
            auto_create_access_credential,
            security_group_id,
            key_pair_name,
        })
    }

    /// Returns the deployment name.
    #[must_use]
    pub const fn name(&self) -> &DeploymentName {
        &self.name
    }

    /// Returns the target region.
    ///
    /// For existing-instance deployments this is informational; the
    /// instance's actual region governs.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Returns the instance size for new instances.
    #[must_use]
    pub const fn instance_size(&self) -> InstanceSize {
        self.instance_size
    }

    /// Returns the rollout kind.
    #[must_use]
    pub const fn rollout_kind(&self) -> RolloutKind {
        self.rollout_kind
    }

    /// Returns the deployment target.
    #[must_use]
    pub const fn target(&self) -> &TargetMode {
        &self.target
    }

    /// Returns whether migrations run as part of the rollout.
    #[must_use]
    pub const fn include_migrations(&self) -> bool {
        self.include_migrations
    }

    /// Returns whether the database is initialised. Always `false` for
    /// incremental rollouts.
    #[must_use]
    pub const fn initialize_database(&self) -> bool {
        self.initialize_database
    }

    /// Returns whether the provider should create a security boundary.
    #[must_use]
    pub const fn auto_create_security_boundary(&self) -> bool {
        self.auto_create_security_boundary
    }

    /// Returns whether the provider should create an access credential.
    #[must_use]
    pub const fn auto_create_access_credential(&self) -> bool {
        self.auto_create_access_credential
    }

    /// Returns the designated security group a new instance should reuse.
    #[must_use]
    pub const fn security_group_id(&self) -> Option<&SecurityGroupId> {
        self.security_group_id.as_ref()
    }

    /// Returns the designated key pair a new instance should reuse.
    #[must_use]
    pub const fn key_pair_name(&self) -> Option<&KeyPairName> {
        self.key_pair_name.as_ref()
    }
}

fn resolve_target(target: TargetSelection) -> Result<TargetMode, DeploymentRequestError> {
    match target {
        TargetSelection::NewInstance => Ok(TargetMode::NewInstance),
        TargetSelection::ExistingInstance(raw) => {
            let value = raw.ok_or(DeploymentRequestError::MissingInstanceTarget)?;
            InstanceId::new(value)
                .map(TargetMode::ExistingInstance)
                .map_err(|err| match err {
                    DeploymentDomainError::InstanceIdTooLong { max, actual } => {
                        DeploymentRequestError::InstanceTargetTooLong { max, actual }
                    }
                    _ => DeploymentRequestError::MissingInstanceTarget,
                })
        }
    }
}
