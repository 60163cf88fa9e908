//! Given steps for stale deployment sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use chrono::{TimeDelta, Utc};
use quillhost::deployment::{
    domain::{Deployment, DeploymentId, DeploymentName, DeploymentStatus, PersistedDeploymentData},
    ports::DeploymentRepository,
};
use quillhost::provisioning::domain::Region;
use rstest_bdd_macros::given;

#[given("a pending deployment created {age_secs} seconds ago")]
fn pending_deployment(world: &mut SweepWorld, age_secs: i64) -> Result<(), eyre::Report> {
    let created_at = Utc::now() - TimeDelta::seconds(age_secs);
    let deployment = Deployment::from_persisted(PersistedDeploymentData {
        id: DeploymentId::new(),
        name: DeploymentName::new("checkout-api")?,
        region: Region::EuWest1,
        status: DeploymentStatus::Pending,
        log: vec!["provisioning request accepted".to_owned()],
        endpoint: None,
        created_at,
        updated_at: created_at,
    });
    run_async(world.repository.store(&deployment))?;
    world.seeded = Some(deployment);
    Ok(())
}

#[given(r#"the provider reports the instance "{instance_id}" running at "{address}""#)]
fn provider_reports_running(
    world: &mut SweepWorld,
    instance_id: String,
    address: String,
) -> Result<(), eyre::Report> {
    let deployment_id = world.seeded()?.id();
    run_async(
        world
            .completion
            .mark_running(deployment_id, instance_id, address, None),
    )?;
    Ok(())
}
