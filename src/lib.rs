//! Taskboard: client-side state engine for a kanban task board.
//!
//! The crate keeps a locally held, paginated collection of tasks grouped into
//! status columns (to do, in progress, done). It orders and sorts them,
//! applies drag-and-drop moves optimistically and synchronises every change
//! with a remote task backend.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Ordering, sorting and pagination with no I/O
//! - **Ports**: The remote task gateway and the user notice channel
//! - **Adapters**: HTTP and in-memory gateways, tracing and recording
//!   notifiers
//! - **Services**: The board store, debounced search and snapshots
//!
//! # Modules
//!
//! - [`config`]: Store and gateway settings
//! - [`task`]: The board itself

pub mod config;
pub mod task;
