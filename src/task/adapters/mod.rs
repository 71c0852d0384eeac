//! Adapter implementations for the task board ports.
//!
//! - [`memory`]: in-memory backend and recording notifier for tests
//! - [`http`]: JSON-over-HTTP client for the task backend
//! - [`log::TracingNotifier`]: notices routed to `tracing`

pub mod http;
pub mod log;
pub mod memory;
