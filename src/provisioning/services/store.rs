//! Service layer for saving and loading operator configuration.

use crate::provisioning::{
    domain::{OperatorId, ProvisioningConfig, ProvisioningConfigDraft, ProvisioningConfigError},
    ports::{ConfigRepositoryError, ProvisioningConfigRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    /// Field-level validation failed; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ProvisioningConfigError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ConfigRepositoryError),
}

/// Result type for configuration service operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

/// Validates and stores the single live configuration per operator.
#[derive(Clone)]
pub struct ConfigStoreService<R, C>
where
    R: ProvisioningConfigRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ConfigStoreService<R, C>
where
    R: ProvisioningConfigRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new configuration service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates `draft` and replaces the operator's stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::Validation`] before touching storage when a
    /// field is invalid, or [`ConfigStoreError::Repository`] when persistence
    /// fails.
    pub async fn save(
        &self,
        operator_id: OperatorId,
        draft: ProvisioningConfigDraft,
    ) -> ConfigStoreResult<ProvisioningConfig> {
        let config = ProvisioningConfig::from_draft(operator_id, draft, &*self.clock)?;
        self.repository.upsert(&config).await?;
        info!(
            operator_id = %operator_id,
            region = %config.default_region(),
            instance_size = %config.default_instance_size(),
            "provisioning config saved"
        );
        Ok(config)
    }

    /// Loads the operator's configuration.
    ///
    /// Returns `Ok(None)` when no configuration has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::Repository`] when persistence lookup fails.
    pub async fn load(
        &self,
        operator_id: OperatorId,
    ) -> ConfigStoreResult<Option<ProvisioningConfig>> {
        Ok(self.repository.find_by_operator(operator_id).await?)
    }
}
