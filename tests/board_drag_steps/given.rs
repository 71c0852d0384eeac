//! Given steps for drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async, titled_task};
use rstest_bdd_macros::given;
use taskboard::task::{
    adapters::memory::GatewayOperation, domain::TaskStatus, ports::GatewayError,
    services::FetchOutcome,
};

#[given(r#"a board with to-do tasks "{first}" and "{second}" and in-progress task "{working}""#)]
fn board_with_tasks(
    world: &mut BoardWorld,
    first: String,
    second: String,
    working: String,
) -> Result<(), eyre::Report> {
    world.gateway.seed([
        titled_task(&first, TaskStatus::Todo, 0),
        titled_task(&second, TaskStatus::Todo, 1),
        titled_task(&working, TaskStatus::InProgress, 0),
    ]);
    let outcome = run_async(world.store.initial_load());
    if !matches!(outcome, FetchOutcome::Loaded { appended: 3 }) {
        return Err(eyre::eyre!("initial load returned {outcome:?}"));
    }
    Ok(())
}

#[given("the backend rejects the next move")]
fn backend_rejects_next_move(world: &mut BoardWorld) {
    world.gateway.fail_next(
        GatewayOperation::Reorder,
        GatewayError::Network("connection reset".to_owned()),
    );
}
