//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit and integration tests without a running backend.

mod gateway;
mod notifier;

pub use gateway::{GatewayCall, GatewayOperation, InMemoryTaskGateway};
pub use notifier::RecordingNotifier;
