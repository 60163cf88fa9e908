//! Wire types exchanged with the provisioning service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::deployment::domain::{DeploymentRequest, RolloutKind};

/// Request body for `POST /deployments`.
#[derive(Debug, Serialize)]
pub(super) struct SubmitPayload<'a> {
    pub(super) name: &'a str,
    region: &'static str,
    instance_size: &'static str,
    rollout_kind: RolloutKind,
    target_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_instance_id: Option<&'a str>,
    include_migrations: bool,
    initialize_database: bool,
    auto_create_security_boundary: bool,
    auto_create_access_credential: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_group_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_pair_name: Option<&'a str>,
}

impl<'a> From<&'a DeploymentRequest> for SubmitPayload<'a> {
    fn from(request: &'a DeploymentRequest) -> Self {
        Self {
            name: request.name().as_str(),
            region: request.region().as_str(),
            instance_size: request.instance_size().as_str(),
            rollout_kind: request.rollout_kind(),
            target_mode: request.target().as_str(),
            existing_instance_id: request.target().existing_instance_id().map(|id| id.as_str()),
            include_migrations: request.include_migrations(),
            initialize_database: request.initialize_database(),
            auto_create_security_boundary: request.auto_create_security_boundary(),
            auto_create_access_credential: request.auto_create_access_credential(),
            security_group_id: request.security_group_id().map(|id| id.as_str()),
            key_pair_name: request.key_pair_name().map(|name| name.as_str()),
        }
    }
}

/// Body of an accepted submission.
#[derive(Debug, Deserialize)]
pub(super) struct AcceptedResponse {
    pub(super) deployment_id: Uuid,
    #[serde(default)]
    pub(super) initial_log_line: Option<String>,
}

/// Body of a rejected submission.
#[derive(Debug, Deserialize)]
pub(super) struct RejectedResponse {
    pub(super) reason: String,
}
