//! Repository port for the single-row-per-operator configuration table.

use crate::provisioning::domain::{OperatorId, ProvisioningConfig};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration repository operations.
pub type ConfigRepositoryResult<T> = Result<T, ConfigRepositoryError>;

/// Provisioning configuration persistence contract.
#[async_trait]
pub trait ProvisioningConfigRepository: Send + Sync {
    /// Inserts the operator's configuration or fully replaces the existing
    /// one. No history is kept.
    async fn upsert(&self, config: &ProvisioningConfig) -> ConfigRepositoryResult<()>;

    /// Finds the live configuration for an operator.
    ///
    /// Returns `None` when the operator has never saved one.
    async fn find_by_operator(
        &self,
        operator_id: OperatorId,
    ) -> ConfigRepositoryResult<Option<ProvisioningConfig>>;
}

/// Errors returned by configuration repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
