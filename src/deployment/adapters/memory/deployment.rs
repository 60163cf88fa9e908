//! In-memory repository for deployment records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::deployment::{
    domain::{Deployment, DeploymentId, DeploymentStatus, PendingTransition},
    ports::{
        DeploymentRepository, DeploymentRepositoryError, DeploymentRepositoryResult,
        TransitionOutcome,
    },
};

/// Thread-safe in-memory deployment repository.
///
/// Conditional transitions check and write under a single write-lock
/// acquisition, matching the row-level compare-and-swap of the `PostgreSQL`
/// adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeploymentRepository {
    deployments: Arc<RwLock<HashMap<DeploymentId, Deployment>>>,
}

impl InMemoryDeploymentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored deployments.
    ///
    /// # Errors
    ///
    /// Returns [`DeploymentRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn stored_count(&self) -> DeploymentRepositoryResult<usize> {
        let deployments = self.deployments.read().map_err(poisoned)?;
        Ok(deployments.len())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> DeploymentRepositoryError {
    DeploymentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DeploymentRepository for InMemoryDeploymentRepository {
    async fn store(&self, deployment: &Deployment) -> DeploymentRepositoryResult<()> {
        let mut deployments = self.deployments.write().map_err(poisoned)?;
        if deployments.contains_key(&deployment.id()) {
            return Err(DeploymentRepositoryError::DuplicateDeployment(
                deployment.id(),
            ));
        }
        deployments.insert(deployment.id(), deployment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DeploymentId) -> DeploymentRepositoryResult<Option<Deployment>> {
        let deployments = self.deployments.read().map_err(poisoned)?;
        Ok(deployments.get(&id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> DeploymentRepositoryResult<Vec<Deployment>> {
        let deployments = self.deployments.read().map_err(poisoned)?;
        let mut recent: Vec<Deployment> = deployments.values().cloned().collect();
        recent.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn list_pending_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<Vec<Deployment>> {
        let deployments = self.deployments.read().map_err(poisoned)?;
        let mut stale: Vec<Deployment> = deployments
            .values()
            .filter(|deployment| {
                deployment.status() == DeploymentStatus::Pending
                    && deployment.created_at() < cutoff
            })
            .cloned()
            .collect();
        stale.sort_by_key(Deployment::created_at);
        Ok(stale)
    }

    async fn transition_from_pending(
        &self,
        id: DeploymentId,
        transition: &PendingTransition,
        at: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<TransitionOutcome> {
        let mut deployments = self.deployments.write().map_err(poisoned)?;
        let deployment = deployments
            .get_mut(&id)
            .ok_or(DeploymentRepositoryError::NotFound(id))?;

        if deployment.status() != DeploymentStatus::Pending {
            return Ok(TransitionOutcome::NotPending(deployment.clone()));
        }
        deployment
            .apply_transition(transition, at)
            .map_err(DeploymentRepositoryError::persistence)?;
        Ok(TransitionOutcome::Applied(deployment.clone()))
    }
}
