//! Board store: the single owner of client-side task state.
//!
//! Every mutation happens in a short synchronous critical section; gateway
//! calls run outside the lock. Observers subscribe to a revision counter and
//! pull a [`BoardSnapshot`] when it moves.

use std::sync::{Arc, Mutex, PoisonError};

use mockable::Clock;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    search::SearchCoordinator,
    snapshot::BoardSnapshot,
    state::{BoardState, FetchOutcome},
};
use crate::config::BoardConfig;
use crate::task::{
    domain::{
        MovePlan, MoveRequest, Partition, SortPolicy, Task, TaskDomainError, TaskDraft, TaskId,
        TaskStatus,
    },
    ports::{GatewayError, ListQuery, Notice, Notifier, TaskGateway},
};

/// Errors returned by board store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// The input failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The task is not held by the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Result type for board store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

struct StoreInner<G, N, C> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    clock: Arc<C>,
    config: BoardConfig,
    state: Mutex<BoardState>,
    changes: watch::Sender<u64>,
    search: SearchCoordinator,
}

/// Client-side task board.
///
/// Cloning is cheap; clones share the same board.
pub struct TaskBoardStore<G, N, C>
where
    G: TaskGateway + 'static,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    inner: Arc<StoreInner<G, N, C>>,
}

impl<G, N, C> Clone for TaskBoardStore<G, N, C>
where
    G: TaskGateway + 'static,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G, N, C> TaskBoardStore<G, N, C>
where
    G: TaskGateway + 'static,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty board.
    #[must_use]
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, clock: Arc<C>, config: BoardConfig) -> Self {
        let (changes, _initial) = watch::channel(0);
        let search = SearchCoordinator::new(config.search_debounce);
        Self {
            inner: Arc::new(StoreInner {
                gateway,
                notifier,
                clock,
                config,
                state: Mutex::new(BoardState::default()),
                changes,
                search,
            }),
        }
    }

    /// Clears the board and fetches the first unfiltered page.
    ///
    /// Drops any keyword and any search still waiting for its debounce
    /// window. A failure is reported to the notifier and stops paging.
    pub async fn initial_load(&self) -> FetchOutcome {
        if self.inner.search.cancel() {
            debug!("dropped pending search before reload");
        }
        self.mutate(|state| {
            state.clear_keyword();
            state.reset();
        });
        info!("loading board");
        self.fetch_page(Partition::All).await
    }

    /// Fetches the next board-wide page.
    ///
    /// Skipped while a board-wide fetch is in flight or when no pages remain.
    pub async fn load_more(&self) -> FetchOutcome {
        self.fetch_page(Partition::All).await
    }

    /// Fetches the next page of one column.
    ///
    /// Skipped while a fetch for that column is in flight or when no pages
    /// remain.
    pub async fn load_more_for_column(&self, status: TaskStatus) -> FetchOutcome {
        self.fetch_page(Partition::Status(status)).await
    }

    /// Updates the search keyword.
    ///
    /// When the trimmed keyword differs from the current one the board is
    /// cleared immediately and a fetch is scheduled after the debounce
    /// window. Each call supersedes the fetch scheduled by the previous one.
    /// Must be called from within a Tokio runtime.
    pub fn set_search_keyword(&self, keyword: &str) {
        let normalized = SearchCoordinator::normalize(keyword);
        let changed = self.transact(|state| {
            let changed = state.replace_keyword(normalized);
            (changed, changed)
        });
        if !changed {
            return;
        }
        let store = self.clone();
        self.inner.search.schedule(async move {
            store.fetch_page(Partition::All).await;
        });
    }

    /// Re-sorts the held tasks under `policy` without refetching.
    pub fn set_sort_policy(&self, policy: SortPolicy) {
        self.transact(|state| ((), state.replace_sort_policy(policy)));
    }

    /// Applies a drag-and-drop move locally.
    ///
    /// Returns the plan to pass to [`Self::commit_move`], or `None` when the
    /// drop was a no-op. The backend is not contacted.
    pub fn move_task(&self, request: &MoveRequest) -> Option<MovePlan> {
        self.transact(|state| match state.apply_move(request) {
            Some((plan, changed)) => (Some(plan), changed),
            None => (None, false),
        })
    }

    /// Persists a move applied by [`Self::move_task`].
    ///
    /// On failure the error is reported and the board reloads from the
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Gateway`] when the backend rejects the move.
    pub async fn commit_move(&self, plan: &MovePlan) -> TaskStoreResult<()> {
        let result = self
            .inner
            .gateway
            .reorder(&plan.task_id, plan.status, plan.order_index)
            .await;
        match result {
            Ok(()) => {
                debug!(
                    task_id = %plan.task_id,
                    status = plan.status.as_str(),
                    order_index = plan.order_index,
                    "move persisted"
                );
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %plan.task_id, error = %err, "move rejected, reloading board");
                self.report(&err);
                self.initial_load().await;
                Err(err.into())
            }
        }
    }

    /// Creates a task on the backend and adds it to the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] for an invalid draft and
    /// [`TaskStoreError::Gateway`] when the backend call fails. The board is
    /// unchanged on error.
    pub async fn create_task(&self, draft: TaskDraft) -> TaskStoreResult<Task> {
        draft.validate()?;
        let created = self
            .inner
            .gateway
            .create(&draft)
            .await
            .map_err(|err| self.fail(err))?;
        let task = Task::from_created(
            created.task_id,
            draft,
            created.order_index,
            &*self.inner.clock,
        );
        self.mutate(|state| state.upsert(task.clone()));
        info!(task_id = %task.id(), "task created");
        self.inner.notifier.notify(Notice::success("task created"));
        Ok(task)
    }

    /// Saves every editable field of `task`.
    ///
    /// A changed status sends the task to the end of its new column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Domain`] for invalid fields and
    /// [`TaskStoreError::Gateway`] when the backend call fails. The board is
    /// unchanged on error.
    pub async fn update_task(&self, task: Task) -> TaskStoreResult<()> {
        task.to_draft().validate()?;
        self.inner
            .gateway
            .update(&task)
            .await
            .map_err(|err| self.fail(err))?;
        info!(task_id = %task.id(), "task updated");
        self.mutate(|state| state.apply_update(task));
        self.inner.notifier.notify(Notice::success("task updated"));
        Ok(())
    }

    /// Deletes a task on the backend and removes it from the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Gateway`] when the backend call fails. The
    /// board is unchanged on error.
    pub async fn delete_task(&self, task_id: &TaskId) -> TaskStoreResult<()> {
        self.inner
            .gateway
            .delete(task_id)
            .await
            .map_err(|err| self.fail(err))?;
        info!(task_id = %task_id, "task deleted");
        self.transact(|state| ((), state.remove(task_id)));
        self.inner.notifier.notify(Notice::success("task deleted"));
        Ok(())
    }

    /// Moves a task to the end of another column.
    ///
    /// The change is applied before the backend call. If the call fails the
    /// task returns to its old slot, unless it was moved again meanwhile.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownTask`] when the task is not on the
    /// board and [`TaskStoreError::Gateway`] when the backend call fails.
    pub async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TaskStoreResult<()> {
        let recoloured = self.transact(|state| match state.recolour(task_id, status) {
            Some(prior) => {
                let changed = prior.is_some();
                (Some(prior), changed)
            }
            None => (None, false),
        });
        let prior = recoloured.ok_or_else(|| TaskStoreError::UnknownTask(task_id.clone()))?;
        let Some(prior_placement) = prior else {
            return Ok(());
        };

        if let Err(err) = self.inner.gateway.update_status(task_id, status).await {
            let reverted =
                self.transact(|state| {
                    let reverted = state.revert_recolour(task_id, status, prior_placement);
                    (reverted, reverted)
                });
            warn!(task_id = %task_id, error = %err, reverted, "status change rejected");
            return Err(self.fail(err));
        }
        Ok(())
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.read(BoardState::snapshot)
    }

    /// Returns a receiver that observes the board revision.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    /// Returns the held tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read(|state| state.tasks().to_vec())
    }

    /// Returns whether a board-wide fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.is_loading(Partition::All))
    }

    /// Returns whether a fetch for one column is in flight.
    #[must_use]
    pub fn is_column_loading(&self, status: TaskStatus) -> bool {
        self.read(|state| state.is_loading(Partition::Status(status)))
    }

    /// Returns whether `partition` may have further pages.
    #[must_use]
    pub fn has_more(&self, partition: Partition) -> bool {
        self.read(|state| state.has_more(partition))
    }

    /// Returns the active search keyword.
    #[must_use]
    pub fn keyword(&self) -> String {
        self.read(|state| state.keyword().to_owned())
    }

    /// Returns the active sort policy.
    #[must_use]
    pub fn sort_policy(&self) -> SortPolicy {
        self.read(BoardState::sort_policy)
    }

    /// Runs a search still waiting for its debounce window now.
    ///
    /// Returns whether a search ran.
    pub async fn flush_search(&self) -> bool {
        self.inner.search.flush().await
    }

    /// Drops a search still waiting for its debounce window.
    ///
    /// Returns whether a search was dropped.
    pub fn cancel_search(&self) -> bool {
        self.inner.search.cancel()
    }

    /// Returns whether a search is waiting for its debounce window.
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.inner.search.is_pending()
    }

    async fn fetch_page(&self, partition: Partition) -> FetchOutcome {
        let claimed = self.transact(|state| {
            let ticket = state.begin_fetch(partition);
            let claimed = ticket.is_some();
            (ticket, claimed)
        });
        let Some(ticket) = claimed else {
            debug!(?partition, "fetch skipped");
            return FetchOutcome::Skipped;
        };

        let query = ListQuery::page(ticket.page)
            .with_page_size(self.inner.config.page_size)
            .with_status(partition.status())
            .with_search(&ticket.keyword);
        debug!(?partition, page = ticket.page, keyword = %ticket.keyword, "fetching tasks");

        match self.inner.gateway.list(&query).await {
            Ok(page) => self.transact(|state| {
                let outcome = state.complete_fetch(&ticket, page);
                (outcome, outcome != FetchOutcome::Discarded)
            }),
            Err(err) => {
                warn!(?partition, page = ticket.page, error = %err, "fetch failed");
                self.report(&err);
                self.transact(|state| {
                    let outcome = state.fail_fetch(&ticket);
                    (outcome, outcome != FetchOutcome::Discarded)
                })
            }
        }
    }

    fn report(&self, err: &GatewayError) {
        self.inner.notifier.notify(Notice::error(err.user_message()));
    }

    fn fail(&self, err: GatewayError) -> TaskStoreError {
        warn!(error = %err, "backend call failed");
        self.report(&err);
        err.into()
    }

    /// Runs `apply` under the lock; publishes a new revision when it reports
    /// a change.
    fn transact<R>(&self, apply: impl FnOnce(&mut BoardState) -> (R, bool)) -> R {
        let (result, revision) = {
            let mut state = self.lock();
            let (result, changed) = apply(&mut state);
            (result, changed.then(|| state.bump_revision()))
        };
        if let Some(current) = revision {
            self.inner.changes.send_replace(current);
        }
        result
    }

    fn mutate(&self, apply: impl FnOnce(&mut BoardState)) {
        self.transact(|state| {
            apply(state);
            ((), true)
        });
    }

    fn read<R>(&self, inspect: impl FnOnce(&BoardState) -> R) -> R {
        inspect(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
