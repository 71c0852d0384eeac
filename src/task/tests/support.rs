//! Task fixtures shared by the unit tests.

use chrono::{DateTime, TimeDelta, Utc};

use crate::task::domain::{
    Priority, SortPolicy, Task, TaskId, TaskRecord, TaskStatus, sort_tasks,
};

/// Builder for tasks with predictable field values.
pub struct TaskBuilder {
    record: TaskRecord,
}

impl TaskBuilder {
    /// Starts a task titled after its id, created at the epoch.
    pub fn new(id: &str, status: TaskStatus, order_index: u32) -> Self {
        Self {
            record: TaskRecord {
                id: TaskId::new(id),
                title: id.to_owned(),
                description: String::new(),
                priority: Priority::Medium,
                status,
                deadline: None,
                created_at: DateTime::<Utc>::UNIX_EPOCH,
                order_index: Some(order_index),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_owned();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.description = description.to_owned();
        self
    }

    pub const fn priority(mut self, priority: Priority) -> Self {
        self.record.priority = priority;
        self
    }

    pub fn deadline(mut self, deadline: &str) -> Self {
        self.record.deadline = Some(parse_time(deadline));
        self
    }

    pub fn created_minutes_after_epoch(mut self, minutes: i64) -> Self {
        self.record.created_at = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::minutes(minutes);
        self
    }

    pub const fn unindexed(mut self) -> Self {
        self.record.order_index = None;
        self
    }

    pub fn build(self) -> Task {
        Task::from_record(self.record)
    }
}

/// Shorthand for a task with default fields.
pub fn task(id: &str, status: TaskStatus, order_index: u32) -> Task {
    TaskBuilder::new(id, status, order_index).build()
}

pub fn parse_time(value: &str) -> DateTime<Utc> {
    value
        .parse::<DateTime<Utc>>()
        .expect("fixture timestamps are valid RFC 3339")
}

/// Returns `(id, order_index)` pairs of one column in manual order.
pub fn column(tasks: &[Task], status: TaskStatus) -> Vec<(String, Option<u32>)> {
    let mut ordered = tasks.to_vec();
    sort_tasks(&mut ordered, SortPolicy::Manual);
    ordered
        .iter()
        .filter(|task| task.status() == status)
        .map(|task| (task.id().as_str().to_owned(), task.order_index()))
        .collect()
}

/// Returns the ids of `tasks` in their current order.
pub fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}

/// Returns whether every column holds exactly the indices `0..n`.
pub fn columns_are_contiguous(tasks: &[Task]) -> bool {
    TaskStatus::ALL.into_iter().all(|status| {
        let mut indices: Vec<Option<u32>> = tasks
            .iter()
            .filter(|task| task.status() == status)
            .map(Task::order_index)
            .collect();
        indices.sort_unstable();
        indices
            .into_iter()
            .enumerate()
            .all(|(slot, index)| index == u32::try_from(slot).ok())
    })
}
