//! Keyed timer-based coalescing of bursty operations.
//!
//! Scheduling an action for a key replaces whatever was pending for that key
//! and restarts its quiet period. Once the timer fires the action runs as a
//! detached task, so a later `schedule` or `cancel` never aborts a request
//! already on the wire.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

type Action = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
type PendingMap<K> = Arc<Mutex<HashMap<K, PendingAction>>>;

struct PendingAction {
    ticket: u64,
    timer: JoinHandle<()>,
    action: Action,
}

impl PendingAction {
    /// Stops the timer and hands back the action.
    ///
    /// Entries leave the map under its lock, so an action taken out here can
    /// no longer be claimed by its timer.
    fn disarm(self) -> Action {
        self.timer.abort();
        self.action
    }
}

fn lock_pending<K>(
    pending: &Mutex<HashMap<K, PendingAction>>,
) -> MutexGuard<'_, HashMap<K, PendingAction>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Coalesces actions per key.
pub struct Debouncer<K> {
    pending: PendingMap<K>,
    next_ticket: AtomicU64,
}

impl<K> fmt::Debug for Debouncer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer").finish_non_exhaustive()
    }
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: AtomicU64::new(0),
        }
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    /// Creates a debouncer with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` after `delay` unless it is superseded first.
    ///
    /// Any action still pending under `key` is dropped. Must be called from
    /// within a Tokio runtime.
    pub fn schedule<F>(&self, key: K, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let timer_key = key.clone();

        let mut entries = self.lock();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let fired = {
                let mut entries = lock_pending(&pending);
                let current = entries
                    .get(&timer_key)
                    .is_some_and(|entry| entry.ticket == ticket);
                if current {
                    entries.remove(&timer_key)
                } else {
                    None
                }
            };
            if let Some(entry) = fired {
                tokio::spawn(entry.action);
            }
        });
        let previous = entries.insert(
            key,
            PendingAction {
                ticket,
                timer,
                action: Box::pin(action),
            },
        );
        drop(entries);

        if let Some(superseded) = previous {
            drop(superseded.disarm());
            debug!("superseded pending debounced action");
        }
    }

    /// Drops the action pending under `key`.
    ///
    /// Returns whether an action was dropped before it ran.
    pub fn cancel(&self, key: &K) -> bool {
        let removed = self.lock().remove(key);
        removed.map(PendingAction::disarm).is_some()
    }

    /// Runs the action pending under `key` now instead of waiting for its
    /// timer.
    ///
    /// Returns whether an action ran.
    pub async fn flush(&self, key: &K) -> bool {
        let removed = self.lock().remove(key);
        match removed.map(PendingAction::disarm) {
            Some(action) => {
                action.await;
                true
            }
            None => false,
        }
    }

    /// Returns whether an action under `key` is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    /// Returns how many keys have an action waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether no action is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, PendingAction>> {
        lock_pending(&self.pending)
    }
}
