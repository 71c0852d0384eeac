//! Kanban task board.
//!
//! Holds the client-side view of a paginated task list split into status
//! columns, applies drag-and-drop moves optimistically and keeps the view in
//! step with a remote backend. The module follows hexagonal architecture:
//!
//! - Domain types and pure board algorithms in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The board store and its helpers in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
