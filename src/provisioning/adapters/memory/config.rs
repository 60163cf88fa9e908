//! In-memory configuration repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::provisioning::{
    domain::{OperatorId, ProvisioningConfig},
    ports::{ConfigRepositoryError, ConfigRepositoryResult, ProvisioningConfigRepository},
};

/// Thread-safe in-memory configuration repository keyed by operator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigRepository {
    configs: Arc<RwLock<HashMap<OperatorId, ProvisioningConfig>>>,
}

impl InMemoryConfigRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored configurations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn stored_count(&self) -> ConfigRepositoryResult<usize> {
        let configs = self.configs.read().map_err(|err| {
            ConfigRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(configs.len())
    }
}

#[async_trait]
impl ProvisioningConfigRepository for InMemoryConfigRepository {
    async fn upsert(&self, config: &ProvisioningConfig) -> ConfigRepositoryResult<()> {
        let mut configs = self.configs.write().map_err(|err| {
            ConfigRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        configs.insert(config.operator_id(), config.clone());
        Ok(())
    }

    async fn find_by_operator(
        &self,
        operator_id: OperatorId,
    ) -> ConfigRepositoryResult<Option<ProvisioningConfig>> {
        let configs = self.configs.read().map_err(|err| {
            ConfigRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(configs.get(&operator_id).cloned())
    }
}
