//! Shared fixtures for the in-memory board tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    config::BoardConfig,
    task::{
        adapters::memory::{GatewayOperation, InMemoryTaskGateway, RecordingNotifier},
        domain::{Priority, SortPolicy, Task, TaskId, TaskRecord, TaskStatus, sort_tasks},
        services::TaskBoardStore,
    },
};

/// Store type used throughout the in-memory tests.
pub type TestStore = TaskBoardStore<InMemoryTaskGateway, RecordingNotifier, DefaultClock>;

/// A store wired to an in-memory backend and a recording notifier.
pub struct BoardHarness {
    /// The store under test.
    pub store: TestStore,
    /// The backend the store talks to.
    pub gateway: InMemoryTaskGateway,
    /// Receives the store's notices.
    pub notifier: RecordingNotifier,
}

impl BoardHarness {
    /// Wires a store to `gateway` with the given page size.
    pub fn new(gateway: InMemoryTaskGateway, page_size: u32) -> Self {
        let notifier = RecordingNotifier::new();
        let store = TaskBoardStore::new(
            Arc::new(gateway.clone()),
            Arc::new(notifier.clone()),
            Arc::new(DefaultClock),
            BoardConfig::for_tests().with_page_size(page_size),
        );
        Self {
            store,
            gateway,
            notifier,
        }
    }

    /// Returns how many list requests reached the backend.
    pub fn list_requests(&self) -> usize {
        self.gateway.calls_of(GatewayOperation::List).len()
    }
}

/// Builds a task as the backend would return it.
pub fn backend_task(id: &str, title: &str, status: TaskStatus, order_index: u32) -> Task {
    Task::from_record(TaskRecord {
        id: TaskId::new(id),
        title: title.to_owned(),
        description: String::new(),
        priority: Priority::Medium,
        status,
        deadline: None,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        order_index: Some(order_index),
    })
}

/// Twelve tasks spread over the three columns.
#[fixture]
pub fn backlog() -> InMemoryTaskGateway {
    let titles = [
        ("t1", "Write onboarding guide", TaskStatus::Todo),
        ("t2", "Fix login redirect", TaskStatus::Todo),
        ("t3", "Audit dependencies", TaskStatus::Todo),
        ("t4", "Fix flaky upload test", TaskStatus::Todo),
        ("t5", "Design settings page", TaskStatus::Todo),
        ("p1", "Migrate billing tables", TaskStatus::InProgress),
        ("p2", "Fix search ranking", TaskStatus::InProgress),
        ("p3", "Review API naming", TaskStatus::InProgress),
        ("d1", "Release 1.4", TaskStatus::Done),
        ("d2", "Fix typo in footer", TaskStatus::Done),
        ("d3", "Rotate secrets", TaskStatus::Done),
        ("d4", "Archive old boards", TaskStatus::Done),
    ];
    let mut next_index = std::collections::HashMap::new();
    let tasks = titles.into_iter().map(|(id, title, status)| {
        let slot = next_index.entry(status).or_insert(0_u32);
        let task = backend_task(id, title, status, *slot);
        *slot += 1;
        task
    });
    InMemoryTaskGateway::with_tasks(tasks.collect::<Vec<_>>())
}

/// Returns the ids of one column in manual order.
pub fn column_ids(tasks: &[Task], status: TaskStatus) -> Vec<String> {
    let mut ordered = tasks.to_vec();
    sort_tasks(&mut ordered, SortPolicy::Manual);
    ordered
        .into_iter()
        .filter(|task| task.status() == status)
        .map(|task| task.id().as_str().to_owned())
        .collect()
}

/// Returns whether every column holds exactly the indices `0..n`.
pub fn indices_are_contiguous(tasks: &[Task]) -> bool {
    TaskStatus::ALL.into_iter().all(|status| {
        let mut indices: Vec<u32> = tasks
            .iter()
            .filter(|task| task.status() == status)
            .filter_map(Task::order_index)
            .collect();
        indices.sort_unstable();
        let held = tasks.iter().filter(|task| task.status() == status).count();
        indices.len() == held && indices.into_iter().zip(0_u32..).all(|(index, slot)| index == slot)
    })
}
