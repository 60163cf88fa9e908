//! Deployment lifecycle status.

use super::ParseDeploymentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a deployment record.
///
/// `Pending` is the only non-terminal status; nothing ever moves a deployment
/// back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    /// Submitted to the provisioning service; awaiting an outcome.
    Pending,
    /// The provider reported the instance as up.
    Running,
    /// The provider reported failure, or the record went stale.
    Failed,
}

impl DeploymentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Failed => "failed",
        }
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Running | Self::Failed)
    }

    /// Returns whether a transition from `self` to `target` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Running | Self::Failed)
        )
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DeploymentStatus {
    type Error = ParseDeploymentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseDeploymentStatusError(value.to_owned())),
        }
    }
}
