//! Diesel row models for deployment persistence.

use super::schema::deployments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for deployment records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = deployments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeploymentRow {
    /// Deployment identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Deployment name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Region code.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub region: String,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Diagnostic log, oldest first.
    #[diesel(sql_type = diesel::sql_types::Array<diesel::sql_types::Text>)]
    pub deployment_log: Vec<String>,
    /// Provider instance identifier.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub instance_id: Option<String>,
    /// Public address.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub public_address: Option<String>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
}

/// Insert model for deployment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = deployments)]
pub struct NewDeploymentRow {
    /// Deployment identifier.
    pub id: uuid::Uuid,
    /// Deployment name.
    pub name: String,
    /// Region code.
    pub region: String,
    /// Lifecycle status.
    pub status: String,
    /// Diagnostic log, oldest first.
    pub deployment_log: Vec<String>,
    /// Provider instance identifier.
    pub instance_id: Option<String>,
    /// Public address.
    pub public_address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}
