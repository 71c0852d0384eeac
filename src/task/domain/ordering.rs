//! Column ordering for drag-and-drop moves.
//!
//! A move removes the dragged task from its column, inserts it into the
//! destination column relative to an optional target card and renumbers the
//! affected columns so their `order_index` values stay contiguous from zero.

use super::{Task, TaskId, TaskStatus};
use std::cmp::Ordering;

/// Where the dragged card lands relative to the target card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Immediately before the target.
    Before,
    /// Immediately after the target.
    After,
}

impl Placement {
    /// Maps the drag layer's "insert before" flag.
    #[must_use]
    pub const fn from_insert_before(insert_before: bool) -> Self {
        if insert_before { Self::Before } else { Self::After }
    }
}

/// A drag-and-drop move of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    dragged: TaskId,
    target: Option<TaskId>,
    status: TaskStatus,
    placement: Placement,
}

impl MoveRequest {
    /// Builds a move from the raw drop event of the drag layer.
    ///
    /// Without a target the card lands at the end of the column and
    /// `insert_before` is ignored.
    #[must_use]
    pub const fn new(
        dragged: TaskId,
        target: Option<TaskId>,
        status: TaskStatus,
        insert_before: bool,
    ) -> Self {
        Self {
            dragged,
            target,
            status,
            placement: Placement::from_insert_before(insert_before),
        }
    }

    /// Moves `dragged` to the end of the `status` column.
    #[must_use]
    pub const fn to_column_end(dragged: TaskId, status: TaskStatus) -> Self {
        Self {
            dragged,
            target: None,
            status,
            placement: Placement::After,
        }
    }

    /// Moves `dragged` next to `target` in the `status` column.
    #[must_use]
    pub const fn relative_to(
        dragged: TaskId,
        target: TaskId,
        status: TaskStatus,
        placement: Placement,
    ) -> Self {
        Self {
            dragged,
            target: Some(target),
            status,
            placement,
        }
    }

    /// Moves `dragged` so it ends up at `order_index` in the `status` column
    /// of `tasks`, or at the end when the column is shorter.
    #[must_use]
    pub fn to_index(
        tasks: &[Task],
        dragged: TaskId,
        status: TaskStatus,
        order_index: u32,
    ) -> Self {
        let mut column: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.status() == status && task.id() != &dragged)
            .collect();
        column.sort_by(|left, right| compare_order_index(left.order_index(), right.order_index()));
        let target = usize::try_from(order_index)
            .ok()
            .and_then(|slot| column.get(slot))
            .map(|task| task.id().clone());
        match target {
            Some(target) => Self::relative_to(dragged, target, status, Placement::Before),
            None => Self::to_column_end(dragged, status),
        }
    }

    /// Returns the dragged task identifier.
    #[must_use]
    pub const fn dragged(&self) -> &TaskId {
        &self.dragged
    }

    /// Returns the target task identifier, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&TaskId> {
        self.target.as_ref()
    }

    /// Returns the destination column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the placement relative to the target.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }
}

/// Resolved position of a moved task, to be reported to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Moved task.
    pub task_id: TaskId,
    /// Destination column.
    pub status: TaskStatus,
    /// Position within the destination column.
    pub order_index: u32,
}

/// Result of applying a move to a task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The full task list with updated statuses and indices, in input order.
    pub tasks: Vec<Task>,
    /// Where the moved task ended up.
    pub plan: MovePlan,
}

/// Applies `request` to `tasks`.
///
/// Returns `None` when the move is a no-op: the dragged task is unknown or
/// was dropped onto itself. A target that is not in the destination column
/// falls back to appending.
#[must_use]
pub fn compute_move(tasks: &[Task], request: &MoveRequest) -> Option<MoveOutcome> {
    if request.target() == Some(request.dragged()) {
        return None;
    }
    let dragged_pos = tasks.iter().position(|task| task.id() == request.dragged())?;
    let source_status = tasks.get(dragged_pos)?.status();

    let mut destination = column_positions(tasks, request.status(), dragged_pos);
    let insert_at = request
        .target()
        .and_then(|target| {
            destination
                .iter()
                .position(|&pos| tasks.get(pos).is_some_and(|task| task.id() == target))
        })
        .map_or(destination.len(), |target_slot| match request.placement() {
            Placement::Before => target_slot,
            Placement::After => target_slot + 1,
        });
    destination.insert(insert_at, dragged_pos);

    let mut updated = tasks.to_vec();
    if let Some(task) = updated.get_mut(dragged_pos) {
        task.set_status(request.status());
    }
    renumber(&mut updated, &destination);
    if source_status != request.status() {
        let source = column_positions(tasks, source_status, dragged_pos);
        renumber(&mut updated, &source);
    }

    Some(MoveOutcome {
        tasks: updated,
        plan: MovePlan {
            task_id: request.dragged().clone(),
            status: request.status(),
            order_index: to_index(insert_at),
        },
    })
}

/// Assigns contiguous indices from zero to every task of `status`, keeping
/// their current relative order.
///
/// Used to close the gap left behind when a task leaves a column.
pub fn normalize_column(tasks: &mut [Task], status: TaskStatus) {
    let positions = column_positions(tasks, status, usize::MAX);
    renumber(tasks, &positions);
}

/// Positions (into `tasks`) of the `status` column in column order, skipping
/// the task at `excluded`.
fn column_positions(tasks: &[Task], status: TaskStatus, excluded: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|&(pos, task)| pos != excluded && task.status() == status)
        .map(|(pos, _)| pos)
        .collect();
    positions.sort_by(|&left, &right| {
        let left_index = tasks.get(left).and_then(Task::order_index);
        let right_index = tasks.get(right).and_then(Task::order_index);
        compare_order_index(left_index, right_index)
    });
    positions
}

fn renumber(tasks: &mut [Task], positions: &[usize]) {
    for (slot, &pos) in positions.iter().enumerate() {
        if let Some(task) = tasks.get_mut(pos) {
            task.set_order_index(Some(to_index(slot)));
        }
    }
}

/// Orders known indices ascending with unknown indices last.
pub(crate) fn compare_order_index(left: Option<u32>, right: Option<u32>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn to_index(slot: usize) -> u32 {
    u32::try_from(slot).unwrap_or(u32::MAX)
}
