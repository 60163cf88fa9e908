//! `PostgreSQL` repository implementation for deployment records.

use super::{
    models::{DeploymentRow, NewDeploymentRow},
    schema::deployments,
};
use crate::deployment::{
    domain::{
        Deployment, DeploymentId, DeploymentName, DeploymentStatus, InstanceEndpoint,
        PendingTransition, PersistedDeploymentData,
    },
    ports::{
        DeploymentRepository, DeploymentRepositoryError, DeploymentRepositoryResult,
        TransitionOutcome,
    },
};
use crate::provisioning::domain::Region;
use crate::timestamp::to_stored_precision;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by deployment adapters.
pub type DeploymentPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed deployment repository.
#[derive(Debug, Clone)]
pub struct PostgresDeploymentRepository {
    pool: DeploymentPgPool,
}

impl PostgresDeploymentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DeploymentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DeploymentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DeploymentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DeploymentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DeploymentRepositoryError::persistence)?
    }
}

#[async_trait]
impl DeploymentRepository for PostgresDeploymentRepository {
    async fn store(&self, deployment: &Deployment) -> DeploymentRepositoryResult<()> {
        let deployment_id = deployment.id();
        let new_row = to_new_row(deployment);

        self.run_blocking(move |connection| {
            diesel::insert_into(deployments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DeploymentRepositoryError::DuplicateDeployment(deployment_id)
                    }
                    _ => DeploymentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: DeploymentId) -> DeploymentRepositoryResult<Option<Deployment>> {
        self.run_blocking(move |connection| {
            find_row(connection, id)?.map(row_to_deployment).transpose()
        })
        .await
    }

    async fn list_recent(&self, limit: usize) -> DeploymentRepositoryResult<Vec<Deployment>> {
        let row_limit = i64::try_from(limit).map_err(DeploymentRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = deployments::table
                .order(deployments::created_at.desc())
                .limit(row_limit)
                .select(DeploymentRow::as_select())
                .load::<DeploymentRow>(connection)
                .map_err(DeploymentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_deployment).collect()
        })
        .await
    }

    async fn list_pending_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<Vec<Deployment>> {
        self.run_blocking(move |connection| {
            let rows = deployments::table
                .filter(deployments::status.eq(DeploymentStatus::Pending.as_str()))
                .filter(deployments::created_at.lt(cutoff))
                .order(deployments::created_at.asc())
                .select(DeploymentRow::as_select())
                .load::<DeploymentRow>(connection)
                .map_err(DeploymentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_deployment).collect()
        })
        .await
    }

    async fn transition_from_pending(
        &self,
        id: DeploymentId,
        transition: &PendingTransition,
        at: DateTime<Utc>,
    ) -> DeploymentRepositoryResult<TransitionOutcome> {
        let target = transition.target().as_str();
        let appended: Vec<String> = transition.log_entry().map(str::to_owned).into_iter().collect();
        let instance_id = transition
            .endpoint()
            .map(|endpoint| endpoint.instance_id().as_str().to_owned());
        let public_address = transition
            .endpoint()
            .map(|endpoint| endpoint.public_address().to_owned());

        self.run_blocking(move |connection| {
            // Status check and write are one statement; a concurrent writer
            // that commits first makes this update match zero rows.
            let updated = diesel::sql_query(concat!(
                "UPDATE deployments SET status = $2, ",
                "deployment_log = deployment_log || $3::TEXT[], ",
                "instance_id = COALESCE($4, instance_id), ",
                "public_address = COALESCE($5, public_address), ",
                "updated_at = $6 ",
                "WHERE id = $1 AND status = 'pending' ",
                "RETURNING id, name, region, status, deployment_log, instance_id, ",
                "public_address, created_at, updated_at",
            ))
            .bind::<diesel::sql_types::Uuid, _>(id.into_inner())
            .bind::<diesel::sql_types::Varchar, _>(target)
            .bind::<diesel::sql_types::Array<diesel::sql_types::Text>, _>(appended)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Varchar>, _>(instance_id)
            .bind::<diesel::sql_types::Nullable<diesel::sql_types::Varchar>, _>(public_address)
            .bind::<diesel::sql_types::Timestamptz, _>(to_stored_precision(at))
            .get_result::<DeploymentRow>(connection)
            .optional()
            .map_err(DeploymentRepositoryError::persistence)?;

            if let Some(row) = updated {
                return row_to_deployment(row).map(TransitionOutcome::Applied);
            }

            let current = find_row(connection, id)?.ok_or(DeploymentRepositoryError::NotFound(id))?;
            row_to_deployment(current).map(TransitionOutcome::NotPending)
        })
        .await
    }
}

fn find_row(
    connection: &mut PgConnection,
    id: DeploymentId,
) -> DeploymentRepositoryResult<Option<DeploymentRow>> {
    deployments::table
        .filter(deployments::id.eq(id.into_inner()))
        .select(DeploymentRow::as_select())
        .first::<DeploymentRow>(connection)
        .optional()
        .map_err(DeploymentRepositoryError::persistence)
}

fn to_new_row(deployment: &Deployment) -> NewDeploymentRow {
    let endpoint = deployment.endpoint();
    NewDeploymentRow {
        id: deployment.id().into_inner(),
        name: deployment.name().as_str().to_owned(),
        region: deployment.region().as_str().to_owned(),
        status: deployment.status().as_str().to_owned(),
        deployment_log: deployment.log().to_vec(),
        instance_id: endpoint.map(|value| value.instance_id().as_str().to_owned()),
        public_address: endpoint.map(|value| value.public_address().to_owned()),
        created_at: deployment.created_at(),
        updated_at: deployment.updated_at(),
    }
}

fn row_to_deployment(row: DeploymentRow) -> DeploymentRepositoryResult<Deployment> {
    let DeploymentRow {
        id,
        name,
        region,
        status,
        deployment_log,
        instance_id,
        public_address,
        created_at,
        updated_at,
    } = row;

    let endpoint = match (instance_id, public_address) {
        (Some(instance), Some(address)) => Some(
            InstanceEndpoint::new(instance, address)
                .map_err(DeploymentRepositoryError::persistence)?,
        ),
        _ => None,
    };

    let data = PersistedDeploymentData {
        id: DeploymentId::from_uuid(id),
        name: DeploymentName::new(name).map_err(DeploymentRepositoryError::persistence)?,
        region: Region::try_from(region.as_str()).map_err(DeploymentRepositoryError::persistence)?,
        status: DeploymentStatus::try_from(status.as_str())
            .map_err(DeploymentRepositoryError::persistence)?,
        log: deployment_log,
        endpoint,
        created_at,
        updated_at,
    };
    Ok(Deployment::from_persisted(data))
}
