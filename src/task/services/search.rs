//! Debounced keyword search.

use std::future::Future;
use std::time::Duration;

use super::debounce::Debouncer;

/// Operations the board coalesces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebouncedOperation {
    /// Keyword search fetch.
    Search,
}

/// Turns keyword edits into at most one fetch per quiet period.
#[derive(Debug)]
pub struct SearchCoordinator {
    debouncer: Debouncer<DebouncedOperation>,
    delay: Duration,
}

impl SearchCoordinator {
    /// Creates a coordinator waiting `delay` after the last edit.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(),
            delay,
        }
    }

    /// Returns the canonical form of a raw keyword.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_owned()
    }

    /// Returns the debounce window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `fetch`, superseding any search still waiting.
    pub fn schedule<F>(&self, fetch: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.debouncer
            .schedule(DebouncedOperation::Search, self.delay, fetch);
    }

    /// Drops the waiting search, if any.
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel(&DebouncedOperation::Search)
    }

    /// Runs the waiting search now, if any.
    pub async fn flush(&self) -> bool {
        self.debouncer.flush(&DebouncedOperation::Search).await
    }

    /// Returns whether a search is waiting for its quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending(&DebouncedOperation::Search)
    }
}
