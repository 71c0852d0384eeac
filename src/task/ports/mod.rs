//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the board store.

pub mod gateway;
pub mod notifier;

pub use gateway::{
    CreatedTask, DEFAULT_ERROR_MESSAGE, GatewayError, GatewayResult, ListQuery, TaskGateway,
    TaskPage,
};
pub use notifier::{Notice, NoticeLevel, Notifier};
