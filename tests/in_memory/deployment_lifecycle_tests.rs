//! In-memory integration tests for the deployment lifecycle.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{clock, draft, pending_created_ago};
use chrono::TimeDelta;
use mockable::DefaultClock;
use quillhost::deployment::{
    adapters::memory::{
        InMemoryDeploymentRepository, InMemoryProvisioningService, ScriptedResponse,
    },
    domain::{
        DeploymentOptions, DeploymentRequest, DeploymentRequestError, DeploymentStatus,
        RolloutKind,
    },
    ports::DeploymentRepository,
    services::{
        CompletionOutcome, DeploymentCompletionService, DeploymentDispatcher,
        DeploymentStatusTracker, DispatchError,
    },
};
use quillhost::provisioning::{
    adapters::memory::InMemoryConfigRepository, domain::OperatorId, services::ConfigStoreService,
};
use rstest::rstest;

type TestDispatcher =
    DeploymentDispatcher<InMemoryDeploymentRepository, InMemoryProvisioningService, DefaultClock>;

struct Orchestrator {
    configs: ConfigStoreService<InMemoryConfigRepository, DefaultClock>,
    deployments: Arc<InMemoryDeploymentRepository>,
    provisioner: InMemoryProvisioningService,
    dispatcher: TestDispatcher,
    tracker: DeploymentStatusTracker<InMemoryDeploymentRepository, DefaultClock>,
    completion: DeploymentCompletionService<InMemoryDeploymentRepository, DefaultClock>,
}

fn orchestrator(
    provisioner: InMemoryProvisioningService,
    wall_clock: DefaultClock,
) -> Orchestrator {
    let clock = Arc::new(wall_clock);
    let deployments = Arc::new(InMemoryDeploymentRepository::new());
    Orchestrator {
        configs: ConfigStoreService::new(Arc::new(InMemoryConfigRepository::new()), clock.clone()),
        deployments: deployments.clone(),
        provisioner: provisioner.clone(),
        dispatcher: DeploymentDispatcher::new(
            deployments.clone(),
            Arc::new(provisioner),
            clock.clone(),
        )
        .with_timeout(Duration::from_secs(2)),
        tracker: DeploymentStatusTracker::new(deployments.clone(), clock.clone()),
        completion: DeploymentCompletionService::new(deployments, clock),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_operator_deploys_and_reaches_running(clock: DefaultClock) {
    let system = orchestrator(InMemoryProvisioningService::accepting(), clock);
    let operator_id = OperatorId::new();
    system
        .configs
        .save(operator_id, draft("eu-west-2").with_security_group_id("sg-0abc"))
        .await
        .expect("configuration should save");
    system
        .provisioner
        .push_response(ScriptedResponse::accept("instance launch queued"))
        .expect("script should accept a response");

    let config = system
        .configs
        .load(operator_id)
        .await
        .expect("configuration should load");
    let request = DeploymentRequest::build(
        DeploymentOptions::new("storefront", RolloutKind::Fresh)
            .with_auto_create_security_boundary(true)
            .with_auto_create_access_credential(true),
        config.as_ref(),
    )
    .expect("request should build");
    let handle = system
        .dispatcher
        .dispatch(&request)
        .await
        .expect("dispatch should succeed");

    let submitted = system
        .provisioner
        .submissions()
        .expect("submissions should be readable");
    assert_eq!(submitted, vec![request]);
    assert!(
        submitted
            .first()
            .is_some_and(|sent| !sent.auto_create_security_boundary()
                && sent.auto_create_access_credential())
    );

    let outcome = system
        .completion
        .mark_running(handle.deployment_id(), "i-0feed", "192.0.2.44", None)
        .await
        .expect("completion should apply");
    assert!(matches!(outcome, CompletionOutcome::Applied(_)));

    let stored = system
        .deployments
        .find_by_id(handle.deployment_id())
        .await
        .expect("lookup should succeed")
        .expect("deployment should exist");
    assert_eq!(stored.status(), DeploymentStatus::Running);
    assert_eq!(stored.log(), ["instance launch queued".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operator_without_configuration_cannot_build_a_request(clock: DefaultClock) {
    let system = orchestrator(InMemoryProvisioningService::accepting(), clock);

    let config = system
        .configs
        .load(OperatorId::new())
        .await
        .expect("load should succeed");
    let result = DeploymentRequest::build(
        DeploymentOptions::new("storefront", RolloutKind::Fresh),
        config.as_ref(),
    );

    assert_eq!(result, Err(DeploymentRequestError::MissingCredentials));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_dispatch_leaves_no_deployment(clock: DefaultClock) {
    let system = orchestrator(
        InMemoryProvisioningService::rejecting("instance limit reached"),
        clock,
    );
    let operator_id = OperatorId::new();
    let config = system
        .configs
        .save(operator_id, draft("us-east-2"))
        .await
        .expect("configuration should save");
    let request = DeploymentRequest::build(
        DeploymentOptions::new("storefront", RolloutKind::Incremental)
            .with_existing_instance("i-0123"),
        Some(&config),
    )
    .expect("request should build");

    let result = system.dispatcher.dispatch(&request).await;

    assert!(matches!(result, Err(DispatchError::Rejected { .. })));
    let recent = system
        .deployments
        .list_recent(10)
        .await
        .expect("listing should succeed");
    assert!(recent.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_fails_stale_and_spares_fresh_deployments(clock: DefaultClock) {
    let system = orchestrator(InMemoryProvisioningService::accepting(), clock);
    let stale = pending_created_ago(TimeDelta::seconds(181));
    let fresh = pending_created_ago(TimeDelta::seconds(60));
    for deployment in [&stale, &fresh] {
        system
            .deployments
            .store(deployment)
            .await
            .expect("seeding should succeed");
    }

    let report = system
        .tracker
        .reconcile_once()
        .await
        .expect("sweep should succeed");

    assert_eq!(report.timed_out(), [stale.id()]);
    let recent = system
        .deployments
        .list_recent(10)
        .await
        .expect("listing should succeed");
    let statuses: Vec<_> = recent
        .iter()
        .map(|deployment| (deployment.id(), deployment.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (fresh.id(), DeploymentStatus::Pending),
            (stale.id(), DeploymentStatus::Failed),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_signal_after_timeout_is_reported_terminal(clock: DefaultClock) {
    let system = orchestrator(InMemoryProvisioningService::accepting(), clock);
    let stale = pending_created_ago(TimeDelta::minutes(10));
    system
        .deployments
        .store(&stale)
        .await
        .expect("seeding should succeed");
    system
        .tracker
        .reconcile_once()
        .await
        .expect("sweep should succeed");

    let outcome = system
        .completion
        .mark_failed(stale.id(), "instance terminated by provider")
        .await
        .expect("signal should be handled");

    assert!(matches!(outcome, CompletionOutcome::AlreadyTerminal(_)));
    assert_eq!(outcome.deployment().log().len(), 2);
}
