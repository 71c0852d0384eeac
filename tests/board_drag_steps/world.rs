//! Shared world state for drag-and-drop BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    config::BoardConfig,
    task::{
        adapters::memory::{InMemoryTaskGateway, RecordingNotifier},
        domain::{Priority, SortPolicy, Task, TaskId, TaskRecord, TaskStatus, sort_tasks},
        services::{TaskBoardStore, TaskStoreResult},
    },
};

/// Store type used by the BDD world.
pub type TestStore = TaskBoardStore<InMemoryTaskGateway, RecordingNotifier, DefaultClock>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct BoardWorld {
    pub store: TestStore,
    pub gateway: InMemoryTaskGateway,
    pub notifier: RecordingNotifier,
    pub last_commit: Option<TaskStoreResult<()>>,
}

impl BoardWorld {
    /// Creates a world around an empty backend.
    #[must_use]
    pub fn new() -> Self {
        let gateway = InMemoryTaskGateway::new();
        let notifier = RecordingNotifier::new();
        let store = TaskBoardStore::new(
            Arc::new(gateway.clone()),
            Arc::new(notifier.clone()),
            Arc::new(DefaultClock),
            BoardConfig::for_tests(),
        );
        Self {
            store,
            gateway,
            notifier,
            last_commit: None,
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Maps a column name used in feature files to its status.
pub fn parse_column(name: &str) -> Result<TaskStatus, eyre::Report> {
    match name {
        "todo" => Ok(TaskStatus::Todo),
        "in progress" => Ok(TaskStatus::InProgress),
        "done" => Ok(TaskStatus::Done),
        other => Err(eyre::eyre!("unknown column {other:?}")),
    }
}

/// Builds a backend task titled after its id.
pub fn titled_task(title: &str, status: TaskStatus, order_index: u32) -> Task {
    Task::from_record(TaskRecord {
        id: TaskId::new(title),
        title: title.to_owned(),
        description: String::new(),
        priority: Priority::Medium,
        status,
        deadline: None,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        order_index: Some(order_index),
    })
}

/// Returns the titles of one column in manual order.
pub fn column_titles(tasks: &[Task], status: TaskStatus) -> Vec<String> {
    let mut ordered = tasks.to_vec();
    sort_tasks(&mut ordered, SortPolicy::Manual);
    ordered
        .into_iter()
        .filter(|task| task.status() == status)
        .map(|task| task.title().to_owned())
        .collect()
}
