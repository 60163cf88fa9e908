//! `PostgreSQL` repository implementation for provisioning configurations.

use super::{
    models::{ConfigRow, NewConfigRow},
    schema::provisioning_configs,
};
use crate::provisioning::{
    domain::{
        AccessKeyId, CloudCredentials, InstanceSize, KeyPairName, OperatorId, PersistedConfigData,
        ProvisioningConfig, Region, SecretAccessKey, SecurityGroupId,
    },
    ports::{ConfigRepositoryError, ConfigRepositoryResult, ProvisioningConfigRepository},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use secrecy::ExposeSecret;

/// `PostgreSQL` connection pool type used by configuration adapters.
pub type ConfigPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed configuration repository.
#[derive(Debug, Clone)]
pub struct PostgresConfigRepository {
    pool: ConfigPgPool,
}

impl PostgresConfigRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ConfigPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ConfigRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ConfigRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ConfigRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ConfigRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProvisioningConfigRepository for PostgresConfigRepository {
    async fn upsert(&self, config: &ProvisioningConfig) -> ConfigRepositoryResult<()> {
        let row = to_new_row(config);
        self.run_blocking(move |connection| {
            diesel::insert_into(provisioning_configs::table)
                .values(&row)
                .on_conflict(provisioning_configs::operator_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(ConfigRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_operator(
        &self,
        operator_id: OperatorId,
    ) -> ConfigRepositoryResult<Option<ProvisioningConfig>> {
        self.run_blocking(move |connection| {
            let row = provisioning_configs::table
                .filter(provisioning_configs::operator_id.eq(operator_id.into_inner()))
                .select(ConfigRow::as_select())
                .first::<ConfigRow>(connection)
                .optional()
                .map_err(ConfigRepositoryError::persistence)?;
            row.map(row_to_config).transpose()
        })
        .await
    }
}

fn to_new_row(config: &ProvisioningConfig) -> NewConfigRow {
    let credentials = config.credentials();
    NewConfigRow {
        operator_id: config.operator_id().into_inner(),
        access_key_id: credentials.access_key_id().expose_secret().to_owned(),
        secret_access_key: credentials.secret_access_key().expose_secret().to_owned(),
        default_region: config.default_region().as_str().to_owned(),
        default_instance_size: config.default_instance_size().as_str().to_owned(),
        security_group_id: config.security_group_id().map(|id| id.as_str().to_owned()),
        key_pair_name: config.key_pair_name().map(|name| name.as_str().to_owned()),
        auto_rollout: config.auto_rollout(),
        updated_at: config.updated_at(),
    }
}

fn row_to_config(row: ConfigRow) -> ConfigRepositoryResult<ProvisioningConfig> {
    let ConfigRow {
        operator_id,
        access_key_id,
        secret_access_key,
        default_region,
        default_instance_size,
        security_group_id,
        key_pair_name,
        auto_rollout,
        updated_at,
    } = row;

    let credentials = CloudCredentials::new(
        AccessKeyId::new(access_key_id).map_err(ConfigRepositoryError::persistence)?,
        SecretAccessKey::new(secret_access_key).map_err(ConfigRepositoryError::persistence)?,
    );
    let data = PersistedConfigData {
        operator_id: OperatorId::from_uuid(operator_id),
        credentials,
        default_region: Region::try_from(default_region.as_str())
            .map_err(ConfigRepositoryError::persistence)?,
        default_instance_size: InstanceSize::try_from(default_instance_size.as_str())
            .map_err(ConfigRepositoryError::persistence)?,
        security_group_id: SecurityGroupId::parse_optional(security_group_id)
            .map_err(ConfigRepositoryError::persistence)?,
        key_pair_name: KeyPairName::parse_optional(key_pair_name)
            .map_err(ConfigRepositoryError::persistence)?,
        auto_rollout,
        updated_at,
    };
    Ok(ProvisioningConfig::from_persisted(data))
}
