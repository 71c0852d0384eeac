//! Read-only views of the board.

use std::collections::{HashMap, HashSet};

use crate::task::domain::{PageCursor, Partition, SortPolicy, Task, TaskStatus};

/// Point-in-time copy of the board state.
///
/// Tasks are kept in display order: grouped by column and sorted by the
/// active policy within each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub(super) tasks: Vec<Task>,
    pub(super) keyword: String,
    pub(super) sort_policy: SortPolicy,
    pub(super) cursors: HashMap<Partition, PageCursor>,
    pub(super) loading: HashSet<Partition>,
    pub(super) revision: u64,
}

impl BoardSnapshot {
    /// Returns every held task in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the tasks of one column in display order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Returns the titles of one column in display order.
    #[must_use]
    pub fn column_titles(&self, status: TaskStatus) -> Vec<&str> {
        self.column(status).into_iter().map(Task::title).collect()
    }

    /// Returns the active search keyword; empty means unfiltered.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the active sort policy.
    #[must_use]
    pub const fn sort_policy(&self) -> SortPolicy {
        self.sort_policy
    }

    /// Returns whether a board-wide fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.contains(&Partition::All)
    }

    /// Returns whether a fetch for one column is in flight.
    #[must_use]
    pub fn is_column_loading(&self, status: TaskStatus) -> bool {
        self.loading.contains(&Partition::Status(status))
    }

    /// Returns whether `partition` may have further pages.
    #[must_use]
    pub fn has_more(&self, partition: Partition) -> bool {
        self.cursors
            .get(&partition)
            .copied()
            .unwrap_or_default()
            .has_more()
    }

    /// Returns the revision this snapshot was taken at.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}
