//! Keyword search and its interaction with pagination.

use std::time::Duration;

use super::helpers::{BoardHarness, backlog};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Partition, TaskStatus},
};

fn titles(harness: &BoardHarness) -> Vec<String> {
    harness
        .store
        .tasks()
        .iter()
        .map(|task| task.title().to_owned())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn typing_a_keyword_searches_once_after_the_pause(
    backlog: InMemoryTaskGateway,
) -> Result<()> {
    let harness = BoardHarness::new(backlog, 20);
    harness.store.initial_load().await;

    for partial in ["f", "fi", "fix"] {
        harness.store.set_search_keyword(partial);
    }
    ensure!(harness.store.tasks().is_empty(), "board clears immediately");
    tokio::time::sleep(Duration::from_millis(200)).await;

    ensure!(harness.list_requests() == 2, "one search request");
    ensure!(
        titles(&harness)
            == [
                "Fix login redirect",
                "Fix flaky upload test",
                "Fix search ranking",
                "Fix typo in footer"
            ],
        "unexpected results {:?}",
        titles(&harness)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_results_page_independently(backlog: InMemoryTaskGateway) -> Result<()> {
    let harness = BoardHarness::new(backlog, 2);

    harness.store.set_search_keyword("fix");
    ensure!(harness.store.flush_search().await, "search was pending");
    ensure!(harness.store.tasks().len() == 2, "first page of results");
    ensure!(harness.store.has_more(Partition::All), "more results remain");

    harness.store.load_more().await;
    ensure!(harness.store.tasks().len() == 4, "second page of results");
    ensure!(!harness.store.has_more(Partition::All), "results exhausted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_keyword_restores_the_full_board(
    backlog: InMemoryTaskGateway,
) -> Result<()> {
    let harness = BoardHarness::new(backlog, 20);
    harness.store.set_search_keyword("release");
    harness.store.flush_search().await;
    ensure!(titles(&harness) == ["Release 1.4"], "filtered board");

    harness.store.set_search_keyword("");
    harness.store.flush_search().await;

    ensure!(harness.store.tasks().len() == 12, "unfiltered board");
    ensure!(
        harness.store.snapshot().column(TaskStatus::Done).len() == 4,
        "done column is complete"
    );
    Ok(())
}
