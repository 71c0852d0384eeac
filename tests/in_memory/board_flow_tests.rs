//! End-to-end board flows: load, drag, edit and recover.

use super::helpers::{BoardHarness, backlog, column_ids, indices_are_contiguous};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::{GatewayOperation, InMemoryTaskGateway},
    domain::{MoveRequest, Partition, Placement, TaskDraft, TaskId, TaskStatus},
    ports::GatewayError,
    services::FetchOutcome,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn paging_loads_the_whole_board_once(backlog: InMemoryTaskGateway) -> Result<()> {
    let harness = BoardHarness::new(backlog, 5);

    harness.store.initial_load().await;
    while harness.store.has_more(Partition::All) {
        let outcome = harness.store.load_more().await;
        ensure!(
            matches!(outcome, FetchOutcome::Loaded { .. }),
            "unexpected outcome {outcome:?}"
        );
    }

    ensure!(harness.store.tasks().len() == 12, "every task is held");
    ensure!(harness.list_requests() == 3, "three pages of five");
    ensure!(
        harness.store.load_more().await == FetchOutcome::Skipped,
        "exhausted board does not fetch"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_sequence_stays_in_step_with_the_backend(backlog: InMemoryTaskGateway) -> Result<()> {
    let harness = BoardHarness::new(backlog, 20);
    harness.store.initial_load().await;

    let moves = [
        MoveRequest::relative_to(
            TaskId::new("t3"),
            TaskId::new("p1"),
            TaskStatus::InProgress,
            Placement::Before,
        ),
        MoveRequest::relative_to(
            TaskId::new("d4"),
            TaskId::new("t1"),
            TaskStatus::Todo,
            Placement::After,
        ),
        MoveRequest::to_column_end(TaskId::new("p2"), TaskStatus::Done),
        MoveRequest::relative_to(
            TaskId::new("t5"),
            TaskId::new("t1"),
            TaskStatus::Todo,
            Placement::Before,
        ),
    ];
    for request in &moves {
        let plan = harness
            .store
            .move_task(request)
            .ok_or_else(|| eyre!("move of {} was a no-op", request.dragged()))?;
        harness.store.commit_move(&plan).await?;
        ensure!(
            indices_are_contiguous(&harness.store.tasks()),
            "columns stay contiguous"
        );
    }

    let local = harness.store.tasks();
    let remote = harness.gateway.tasks();
    for status in TaskStatus::ALL {
        ensure!(
            column_ids(&local, status) == column_ids(&remote, status),
            "column {} diverged",
            status.as_str()
        );
    }
    ensure!(
        column_ids(&local, TaskStatus::Todo) == ["t5", "t1", "d4", "t2", "t4"],
        "unexpected to-do order {:?}",
        column_ids(&local, TaskStatus::Todo)
    );
    ensure!(harness.list_requests() == 1, "successful moves never reload");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_restores_server_order(backlog: InMemoryTaskGateway) -> Result<()> {
    let harness = BoardHarness::new(backlog, 20);
    harness.store.initial_load().await;
    let before = harness.store.tasks();

    let plan = harness
        .store
        .move_task(&MoveRequest::to_column_end(
            TaskId::new("t1"),
            TaskStatus::Done,
        ))
        .ok_or_else(|| eyre!("move was a no-op"))?;
    ensure!(harness.store.tasks() != before, "move applied optimistically");
    harness.gateway.fail_next(
        GatewayOperation::Reorder,
        GatewayError::Network("connection reset".to_owned()),
    );

    let result = harness.store.commit_move(&plan).await;

    ensure!(result.is_err(), "commit failure is reported");
    ensure!(harness.store.tasks() == before, "state replaced by a reload");
    ensure!(
        harness.notifier.errors() == ["network error"],
        "user sees the generic message"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_round_trip_through_the_backend(backlog: InMemoryTaskGateway) -> Result<()> {
    let harness = BoardHarness::new(backlog, 20);
    harness.store.initial_load().await;

    let created = harness
        .store
        .create_task(TaskDraft::new("Plan retro").with_status(TaskStatus::InProgress))
        .await?;
    let edited = created.revised(created.to_draft().with_status(TaskStatus::Done));
    harness.store.update_task(edited).await?;
    harness.store.delete_task(&TaskId::new("d1")).await?;
    harness
        .store
        .update_task_status(&TaskId::new("t2"), TaskStatus::Done)
        .await?;

    let remote = harness.gateway.tasks();
    let done = column_ids(&remote, TaskStatus::Done);
    ensure!(
        done == ["d2", "d3", "d4", created.id().as_str(), "t2"],
        "unexpected done column {done:?}"
    );
    ensure!(indices_are_contiguous(&remote), "backend stays contiguous");
    ensure!(
        indices_are_contiguous(&harness.store.tasks()),
        "board stays contiguous"
    );
    ensure!(
        column_ids(&harness.store.tasks(), TaskStatus::Done) == done,
        "local done column matches"
    );
    ensure!(harness.notifier.errors().is_empty(), "no errors reported");
    Ok(())
}
