//! Application services for the task board.

mod debounce;
mod search;
mod snapshot;
mod state;
mod store;

pub use debounce::Debouncer;
pub use search::{DebouncedOperation, SearchCoordinator};
pub use snapshot::BoardSnapshot;
pub use state::FetchOutcome;
pub use store::{TaskBoardStore, TaskStoreError, TaskStoreResult};
