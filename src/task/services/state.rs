//! Mutable board state guarded by the store's lock.

use std::collections::HashMap;

use tracing::debug;

use super::snapshot::BoardSnapshot;
use crate::task::{
    domain::{
        MovePlan, MoveRequest, PaginationManager, Partition, SortPolicy, Task, TaskId, TaskStatus,
        compute_move, ordering::normalize_column, sort_tasks,
    },
    ports::TaskPage,
};

/// What became of a page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Nothing was requested: the partition was loading or exhausted.
    Skipped,
    /// The page was merged into the board.
    Loaded {
        /// Tasks added; duplicates of held tasks are not counted.
        appended: usize,
    },
    /// The board was reset while the request was in flight, so the response
    /// was dropped.
    Discarded,
    /// The request failed and the partition stopped paging.
    Failed,
}

/// A claimed fetch slot for one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FetchTicket {
    pub(super) partition: Partition,
    pub(super) page: u32,
    pub(super) keyword: String,
    generation: u64,
}

/// Status and position a recoloured task had before the change, and the
/// slot it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PriorPlacement {
    status: TaskStatus,
    order_index: Option<u32>,
    placed_at: u32,
}

#[derive(Debug, Default)]
pub(super) struct BoardState {
    tasks: Vec<Task>,
    pagination: PaginationManager,
    keyword: String,
    sort_policy: SortPolicy,
    in_flight: HashMap<Partition, u64>,
    generation: u64,
    revision: u64,
}

impl BoardState {
    pub(super) fn keyword(&self) -> &str {
        &self.keyword
    }

    pub(super) const fn sort_policy(&self) -> SortPolicy {
        self.sort_policy
    }

    pub(super) fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(super) fn is_loading(&self, partition: Partition) -> bool {
        self.in_flight.contains_key(&partition)
    }

    pub(super) fn has_more(&self, partition: Partition) -> bool {
        self.pagination.has_more(partition)
    }

    pub(super) const fn bump_revision(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    pub(super) fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.clone(),
            keyword: self.keyword.clone(),
            sort_policy: self.sort_policy,
            cursors: Partition::ALL
                .into_iter()
                .map(|partition| (partition, self.pagination.cursor(partition)))
                .collect(),
            loading: self.in_flight.keys().copied().collect(),
            revision: self.revision,
        }
    }

    /// Drops every held task and rewinds pagination.
    ///
    /// Responses to requests issued before the reset are discarded on
    /// arrival.
    pub(super) fn reset(&mut self) {
        self.pagination.reset_all(&mut self.tasks);
        self.in_flight.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replaces the keyword and resets the board when it changed.
    pub(super) fn replace_keyword(&mut self, keyword: String) -> bool {
        if self.keyword == keyword {
            return false;
        }
        self.keyword = keyword;
        self.reset();
        true
    }

    pub(super) fn clear_keyword(&mut self) {
        self.keyword.clear();
    }

    pub(super) fn replace_sort_policy(&mut self, policy: SortPolicy) -> bool {
        if self.sort_policy == policy {
            return false;
        }
        self.sort_policy = policy;
        self.resort();
        true
    }

    /// Claims the fetch slot of `partition`.
    ///
    /// Returns `None` while a fetch for the partition is in flight or when it
    /// has no more pages.
    pub(super) fn begin_fetch(&mut self, partition: Partition) -> Option<FetchTicket> {
        if self.is_loading(partition) || !self.has_more(partition) {
            return None;
        }
        self.in_flight.insert(partition, self.generation);
        Some(FetchTicket {
            partition,
            page: self.pagination.next_page(partition),
            keyword: self.keyword.clone(),
            generation: self.generation,
        })
    }

    pub(super) fn complete_fetch(&mut self, ticket: &FetchTicket, page: TaskPage) -> FetchOutcome {
        if !self.release(ticket) {
            debug!(partition = ?ticket.partition, page = ticket.page, "discarding stale page");
            return FetchOutcome::Discarded;
        }
        let appended =
            self.pagination
                .record_page(ticket.partition, &mut self.tasks, page.tasks, page.total);
        self.resort();
        FetchOutcome::Loaded { appended }
    }

    pub(super) fn fail_fetch(&mut self, ticket: &FetchTicket) -> FetchOutcome {
        if !self.release(ticket) {
            return FetchOutcome::Discarded;
        }
        self.pagination.stop(ticket.partition);
        FetchOutcome::Failed
    }

    /// Frees the slot held by `ticket`; returns whether the ticket was still
    /// current.
    fn release(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.in_flight.remove(&ticket.partition);
        true
    }

    /// Applies a move; the flag reports whether the board changed.
    pub(super) fn apply_move(&mut self, request: &MoveRequest) -> Option<(MovePlan, bool)> {
        let outcome = compute_move(&self.tasks, request)?;
        let mut tasks = outcome.tasks;
        sort_tasks(&mut tasks, self.sort_policy);
        let changed = tasks != self.tasks;
        self.tasks = tasks;
        Some((outcome.plan, changed))
    }

    /// Inserts `task`, replacing any held task with the same id.
    pub(super) fn upsert(&mut self, task: Task) {
        self.tasks.retain(|held| held.id() != task.id());
        self.tasks.push(task);
        self.resort();
    }

    /// Applies an edited task.
    ///
    /// The held position wins over the one on `task`, which may predate a
    /// move. A status change sends the task to the end of its new column and
    /// closes the gap in the old one.
    pub(super) fn apply_update(&mut self, task: Task) {
        let held = self
            .position(task.id())
            .and_then(|pos| self.tasks.get(pos))
            .map(|held| (held.status(), held.order_index()));
        match held {
            Some((previous, order_index)) if previous != task.status() => {
                let request = MoveRequest::to_column_end(task.id().clone(), task.status());
                let mut staged = task;
                staged.set_status(previous);
                staged.set_order_index(order_index);
                self.upsert(staged);
                if let Some(outcome) = compute_move(&self.tasks, &request) {
                    self.tasks = outcome.tasks;
                }
                self.resort();
            }
            Some((_, order_index)) => {
                let mut kept = task;
                kept.set_order_index(order_index);
                self.upsert(kept);
            }
            None => self.upsert(task),
        }
    }

    /// Removes a task and renumbers its column; returns whether it was held.
    pub(super) fn remove(&mut self, task_id: &TaskId) -> bool {
        let Some(pos) = self.position(task_id) else {
            return false;
        };
        let removed = self.tasks.remove(pos);
        normalize_column(&mut self.tasks, removed.status());
        self.resort();
        true
    }

    /// Moves a task to the end of the `status` column.
    ///
    /// Returns `None` when the task is not held, and `Some(None)` when it is
    /// already in `status`.
    pub(super) fn recolour(
        &mut self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Option<Option<PriorPlacement>> {
        let task = self.tasks.iter().find(|task| task.id() == task_id)?;
        if task.status() == status {
            return Some(None);
        }
        let (prior_status, prior_index) = (task.status(), task.order_index());
        let (plan, _) = self.apply_move(&MoveRequest::to_column_end(task_id.clone(), status))?;
        Some(Some(PriorPlacement {
            status: prior_status,
            order_index: prior_index,
            placed_at: plan.order_index,
        }))
    }

    /// Undoes [`Self::recolour`] unless the task moved again since.
    ///
    /// The task goes back to its old slot and both columns are renumbered.
    pub(super) fn revert_recolour(
        &mut self,
        task_id: &TaskId,
        status: TaskStatus,
        prior: PriorPlacement,
    ) -> bool {
        let unmoved = self.tasks.iter().any(|task| {
            task.id() == task_id
                && task.status() == status
                && task.order_index() == Some(prior.placed_at)
        });
        if !unmoved {
            return false;
        }
        let request = MoveRequest::to_index(
            &self.tasks,
            task_id.clone(),
            prior.status,
            prior.order_index.unwrap_or(u32::MAX),
        );
        self.apply_move(&request).is_some()
    }

    fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    fn resort(&mut self) {
        sort_tasks(&mut self.tasks, self.sort_policy);
    }
}
