//! Diesel row models for provisioning configuration persistence.

use super::schema::provisioning_configs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for provisioning configurations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = provisioning_configs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConfigRow {
    /// Owning operator account.
    pub operator_id: uuid::Uuid,
    /// Cloud credential identifier.
    pub access_key_id: String,
    /// Cloud credential secret.
    pub secret_access_key: String,
    /// Default region code.
    pub default_region: String,
    /// Default instance size code.
    pub default_instance_size: String,
    /// Designated security group.
    pub security_group_id: Option<String>,
    /// Designated key pair.
    pub key_pair_name: Option<String>,
    /// Auto-rollout flag.
    pub auto_rollout: bool,
    /// Timestamp of the most recent save.
    pub updated_at: DateTime<Utc>,
}

/// Insert and replace model for provisioning configurations.
///
/// `treat_none_as_null` makes an upsert clear a designation the operator has
/// removed instead of leaving the previous value in place.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = provisioning_configs)]
#[diesel(treat_none_as_null = true)]
pub struct NewConfigRow {
    /// Owning operator account.
    pub operator_id: uuid::Uuid,
    /// Cloud credential identifier.
    pub access_key_id: String,
    /// Cloud credential secret.
    pub secret_access_key: String,
    /// Default region code.
    pub default_region: String,
    /// Default instance size code.
    pub default_instance_size: String,
    /// Designated security group.
    pub security_group_id: Option<String>,
    /// Designated key pair.
    pub key_pair_name: Option<String>,
    /// Auto-rollout flag.
    pub auto_rollout: bool,
    /// Timestamp of the most recent save.
    pub updated_at: DateTime<Utc>,
}
