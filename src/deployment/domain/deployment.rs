//! Deployment aggregate root and its transitions.

use super::ids::MAX_TEXT_LENGTH;
use super::{
    DeploymentDomainError, DeploymentId, DeploymentName, DeploymentRequest, DeploymentStatus,
    InstanceId,
};
use crate::provisioning::domain::Region;
use crate::timestamp::{stored_now, to_stored_precision};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Fields the provisioning service returns when it accepts a request.
///
/// Acceptance only means the provider took the job; it says nothing about
/// whether the instance will come up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningAcceptance {
    deployment_id: DeploymentId,
    initial_log_line: Option<String>,
}

impl ProvisioningAcceptance {
    /// Creates an acceptance record. A blank log line is discarded.
    #[must_use]
    pub fn new(deployment_id: DeploymentId, log_line: Option<String>) -> Self {
        Self {
            deployment_id,
            initial_log_line: log_line
                .map(|line| line.trim().to_owned())
                .filter(|line| !line.is_empty()),
        }
    }

    /// Returns the provider-assigned deployment identifier.
    #[must_use]
    pub const fn deployment_id(&self) -> DeploymentId {
        self.deployment_id
    }

    /// Returns the provider's first log line, if any.
    #[must_use]
    pub fn initial_log_line(&self) -> Option<&str> {
        self.initial_log_line.as_deref()
    }
}

/// Where a successfully provisioned instance can be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEndpoint {
    instance_id: InstanceId,
    public_address: String,
}

impl InstanceEndpoint {
    /// Creates a validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentDomainError::EmptyInstanceId`] or
    /// [`DeploymentDomainError::EmptyPublicAddress`] for blank input, and the
    /// matching `TooLong` variant when either part exceeds 255 characters.
    pub fn new(
        instance_id: impl Into<String>,
        public_address: impl Into<String>,
    ) -> Result<Self, DeploymentDomainError> {
        let instance_id = InstanceId::new(instance_id)?;
        let raw_address = public_address.into();
        let address = raw_address.trim();
        if address.is_empty() {
            return Err(DeploymentDomainError::EmptyPublicAddress);
        }
        let actual = address.chars().count();
        if actual > MAX_TEXT_LENGTH {
            return Err(DeploymentDomainError::PublicAddressTooLong {
                max: MAX_TEXT_LENGTH,
                actual,
            });
        }
        Ok(Self {
            instance_id,
            public_address: address.to_owned(),
        })
    }

    /// Returns the provider instance identifier.
    #[must_use]
    pub const fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// Returns the public address.
    #[must_use]
    pub fn public_address(&self) -> &str {
        &self.public_address
    }
}

/// A transition out of `pending`, applied only if the deployment is still
/// `pending` when it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingTransition {
    /// The provider reported the instance as up.
    Running {
        /// Where the instance can be reached.
        endpoint: InstanceEndpoint,
        /// Optional provider log line.
        log_entry: Option<String>,
    },
    /// The provider reported failure, or the record went stale.
    Failed {
        /// Diagnostic log line.
        log_entry: String,
    },
}

impl PendingTransition {
    /// Returns the status this transition moves to.
    #[must_use]
    pub const fn target(&self) -> DeploymentStatus {
        match self {
            Self::Running { .. } => DeploymentStatus::Running,
            Self::Failed { .. } => DeploymentStatus::Failed,
        }
    }

    /// Returns the log entry appended by this transition, if any.
    #[must_use]
    pub fn log_entry(&self) -> Option<&str> {
        match self {
            Self::Running { log_entry, .. } => log_entry.as_deref(),
            Self::Failed { log_entry } => Some(log_entry.as_str()),
        }
    }

    /// Returns the endpoint recorded by this transition, if any.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&InstanceEndpoint> {
        match self {
            Self::Running { endpoint, .. } => Some(endpoint),
            Self::Failed { .. } => None,
        }
    }
}

/// Parameter object for reconstructing a persisted deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDeploymentData {
    /// Persisted deployment identifier.
    pub id: DeploymentId,
    /// Persisted name.
    pub name: DeploymentName,
    /// Persisted region.
    pub region: Region,
    /// Persisted status.
    pub status: DeploymentStatus,
    /// Persisted log lines, oldest first.
    pub log: Vec<String>,
    /// Persisted endpoint, present only for running deployments.
    pub endpoint: Option<InstanceEndpoint>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Deployment aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    id: DeploymentId,
    name: DeploymentName,
    region: Region,
    status: DeploymentStatus,
    log: Vec<String>,
    endpoint: Option<InstanceEndpoint>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Deployment {
    /// Creates the `pending` record for a request the provider accepted.
    #[must_use]
    pub fn new_pending(
        acceptance: &ProvisioningAcceptance,
        request: &DeploymentRequest,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = stored_now(clock);
        Self {
            id: acceptance.deployment_id(),
            name: request.name().clone(),
            region: request.region(),
            status: DeploymentStatus::Pending,
            log: acceptance
                .initial_log_line()
                .map(|line| vec![line.to_owned()])
                .unwrap_or_default(),
            endpoint: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a deployment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDeploymentData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            region: data.region,
            status: data.status,
            log: data.log,
            endpoint: data.endpoint,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the deployment identifier.
    #[must_use]
    pub const fn id(&self) -> DeploymentId {
        self.id
    }

    /// Returns the deployment name.
    #[must_use]
    pub const fn name(&self) -> &DeploymentName {
        &self.name
    }

    /// Returns the requested region.
    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> DeploymentStatus {
        self.status
    }

    /// Returns the log lines, oldest first.
    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Returns the instance endpoint once the deployment is running.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&InstanceEndpoint> {
        self.endpoint.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a transition out of `pending`.
    ///
    /// The log entry is appended and the endpoint recorded only when the
    /// transition is accepted, so re-applying a transition to a terminal
    /// deployment leaves it byte-for-byte unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentDomainError::InvalidStatusTransition`] when the
    /// deployment is no longer `pending`.
    pub fn apply_transition(
        &mut self,
        transition: &PendingTransition,
        at: DateTime<Utc>,
    ) -> Result<(), DeploymentDomainError> {
        let target = transition.target();
        if !self.status.can_transition_to(target) {
            return Err(DeploymentDomainError::InvalidStatusTransition {
                deployment_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if let Some(entry) = transition.log_entry() {
            self.log.push(entry.to_owned());
        }
        if let Some(endpoint) = transition.endpoint() {
            self.endpoint = Some(endpoint.clone());
        }
        self.updated_at = to_stored_precision(at);
        Ok(())
    }
}
