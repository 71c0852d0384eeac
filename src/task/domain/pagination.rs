//! Page cursors for incremental loading.

use super::{Task, TaskId, TaskStatus};
use std::collections::{HashMap, HashSet};

/// Slice of the board a page cursor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Unfiltered board-wide loading.
    All,
    /// Loading for a single column.
    Status(TaskStatus),
}

impl Partition {
    /// Every partition the board tracks.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Status(TaskStatus::Todo),
        Self::Status(TaskStatus::InProgress),
        Self::Status(TaskStatus::Done),
    ];

    /// Returns the status filter for list requests.
    #[must_use]
    pub const fn status(self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Status(status) => Some(status),
        }
    }

    /// Returns whether `task` belongs to this partition.
    #[must_use]
    pub fn contains(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status() == status,
        }
    }

    /// Counts the tasks of `tasks` held for this partition.
    #[must_use]
    pub fn held(self, tasks: &[Task]) -> usize {
        tasks.iter().filter(|task| self.contains(task)).count()
    }
}

/// Page counter and continuation flag of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    has_more: bool,
}

impl PageCursor {
    const fn fresh() -> Self {
        Self {
            page: 1,
            has_more: true,
        }
    }

    /// Returns the next page to request, starting at 1.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns whether further pages may exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Per-partition pagination state.
///
/// The page counter only moves forward when a batch is committed, so a failed
/// fetch never consumes a page.
#[derive(Debug, Clone, Default)]
pub struct PaginationManager {
    cursors: HashMap<Partition, PageCursor>,
}

impl PaginationManager {
    /// Creates a manager with every partition at page 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cursor of `partition`.
    #[must_use]
    pub fn cursor(&self, partition: Partition) -> PageCursor {
        self.cursors.get(&partition).copied().unwrap_or_default()
    }

    /// Returns the page to request next for `partition`.
    #[must_use]
    pub fn next_page(&self, partition: Partition) -> u32 {
        self.cursor(partition).page()
    }

    /// Returns whether `partition` may have further pages.
    #[must_use]
    pub fn has_more(&self, partition: Partition) -> bool {
        self.cursor(partition).has_more()
    }

    /// Commits a fetched batch for `partition`.
    ///
    /// Tasks already held in `collection` (or repeated within the batch) are
    /// dropped; the rest are appended. The page counter advances and
    /// `has_more` is recomputed against `total`. Returns how many tasks were
    /// appended.
    pub fn record_page(
        &mut self,
        partition: Partition,
        collection: &mut Vec<Task>,
        batch: Vec<Task>,
        total: u64,
    ) -> usize {
        let mut known: HashSet<TaskId> = collection.iter().map(|task| task.id().clone()).collect();
        let before = collection.len();
        collection.extend(
            batch
                .into_iter()
                .filter(|task| known.insert(task.id().clone())),
        );
        let appended = collection.len() - before;

        let held = u64::try_from(partition.held(collection)).unwrap_or(u64::MAX);
        let cursor = self.cursors.entry(partition).or_default();
        cursor.page = cursor.page.saturating_add(1);
        cursor.has_more = held < total;
        appended
    }

    /// Rewinds `partition` to page 1 and drops its held tasks.
    pub fn reset(&mut self, partition: Partition, collection: &mut Vec<Task>) {
        collection.retain(|task| !partition.contains(task));
        self.cursors.insert(partition, PageCursor::fresh());
    }

    /// Rewinds every partition and clears the collection.
    pub fn reset_all(&mut self, collection: &mut Vec<Task>) {
        collection.clear();
        self.cursors.clear();
    }

    /// Marks `partition` as exhausted without consuming a page.
    pub fn stop(&mut self, partition: Partition) {
        self.cursors.entry(partition).or_default().has_more = false;
    }
}
