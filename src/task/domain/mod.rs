//! Domain model for the task board.
//!
//! Pure types and logic: the task entity, column ordering for drag-and-drop,
//! sort policies and pagination cursors. Nothing here performs I/O.

mod error;
mod ids;
pub mod ordering;
pub mod pagination;
pub mod sort;
mod task;

pub use error::{ParseSortPolicyError, TaskDomainError};
pub use ids::TaskId;
pub use ordering::{MoveOutcome, MovePlan, MoveRequest, Placement, compute_move};
pub use pagination::{PageCursor, PaginationManager, Partition};
pub use sort::{SortPolicy, compare, sort_tasks};
pub use task::{Priority, Task, TaskDraft, TaskRecord, TaskStatus};
