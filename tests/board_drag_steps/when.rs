//! When steps for drag-and-drop BDD scenarios.

use super::world::{BoardWorld, parse_column, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::{MoveRequest, TaskId};

fn drop_and_commit(world: &mut BoardWorld, request: &MoveRequest) -> Result<(), eyre::Report> {
    let plan = world
        .store
        .move_task(request)
        .ok_or_else(|| eyre::eyre!("move of {} was a no-op", request.dragged()))?;
    world.last_commit = Some(run_async(world.store.commit_move(&plan)));
    Ok(())
}

#[when(r#""{card}" is dragged to the end of the "{column}" column"#)]
fn drag_to_column_end(
    world: &mut BoardWorld,
    card: String,
    column: String,
) -> Result<(), eyre::Report> {
    let request = MoveRequest::new(TaskId::new(card), None, parse_column(&column)?, false);
    drop_and_commit(world, &request)
}

#[when(r#""{card}" is dropped before "{target}" in the "{column}" column"#)]
fn drop_before_card(
    world: &mut BoardWorld,
    card: String,
    target: String,
    column: String,
) -> Result<(), eyre::Report> {
    let request = MoveRequest::new(
        TaskId::new(card),
        Some(TaskId::new(target)),
        parse_column(&column)?,
        true,
    );
    drop_and_commit(world, &request)
}
