//! When steps for stale deployment sweep BDD scenarios.

use super::world::{SweepWorld, run_async};
use rstest_bdd_macros::when;

#[when("the stale deployment sweep runs")]
fn sweep_runs(world: &mut SweepWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.tracker.reconcile_once())?;
    world.last_report = Some(report);
    Ok(())
}

#[when("the stale deployment sweep runs again")]
fn sweep_runs_again(world: &mut SweepWorld) -> Result<(), eyre::Report> {
    sweep_runs(world)
}
