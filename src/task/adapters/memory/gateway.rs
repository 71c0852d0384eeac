//! In-memory task backend for tests and offline use.
//!
//! Behaves like the real backend: filters and pages list requests, assigns
//! identifiers and column positions, and keeps every column contiguous after
//! deletes, recolours and reorders. Latency and failures can be injected, and
//! every call is recorded.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::task::{
    domain::{
        MovePlan, MoveRequest, SortPolicy, Task, TaskDraft, TaskId, TaskRecord,
        TaskStatus, compute_move, ordering::normalize_column, sort_tasks,
    },
    ports::{CreatedTask, GatewayError, GatewayResult, ListQuery, TaskGateway, TaskPage},
};

/// Page size used when a list request does not name one.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Gateway operation kinds, used for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// `list`
    List,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// `update_status`
    UpdateStatus,
    /// `reorder`
    Reorder,
}

/// A call received by the in-memory gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// A list request.
    List(ListQuery),
    /// A create request.
    Create(TaskDraft),
    /// An update request.
    Update(Task),
    /// A delete request.
    Delete(TaskId),
    /// A status-only update.
    UpdateStatus(TaskId, TaskStatus),
    /// A persisted move.
    Reorder(MovePlan),
}

impl GatewayCall {
    /// Returns the operation kind of this call.
    #[must_use]
    pub const fn operation(&self) -> GatewayOperation {
        match self {
            Self::List(_) => GatewayOperation::List,
            Self::Create(_) => GatewayOperation::Create,
            Self::Update(_) => GatewayOperation::Update,
            Self::Delete(_) => GatewayOperation::Delete,
            Self::UpdateStatus(..) => GatewayOperation::UpdateStatus,
            Self::Reorder(_) => GatewayOperation::Reorder,
        }
    }
}

/// Thread-safe in-memory task backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    tasks: Vec<Task>,
    calls: Vec<GatewayCall>,
    failures: HashMap<GatewayOperation, VecDeque<GatewayError>>,
    latency: Duration,
}

fn lock_error(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::Network(err.to_string())
}

fn not_found(task_id: &TaskId) -> GatewayError {
    GatewayError::Rejected {
        status: 404,
        message: Some(format!("task {task_id} not found")),
    }
}

impl InMemoryTaskGateway {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let gateway = Self::new();
        gateway.seed(tasks);
        gateway
    }

    /// Delays every response by `latency`.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.write().latency = latency;
        self
    }

    /// Adds `tasks` to the backend.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        self.write().tasks.extend(tasks);
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// Failures queue up: calling this twice fails the next two calls.
    pub fn fail_next(&self, operation: GatewayOperation, error: GatewayError) {
        self.write()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Returns every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.read().calls.clone()
    }

    /// Returns the calls of one operation kind, oldest first.
    #[must_use]
    pub fn calls_of(&self, operation: GatewayOperation) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation() == operation)
            .collect()
    }

    /// Returns the backend's tasks in column order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        let mut tasks = self.read().tasks.clone();
        sort_tasks(&mut tasks, SortPolicy::Manual);
        tasks
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryBackendState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InMemoryBackendState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `call`, applies latency and pops any injected failure.
    async fn begin(&self, call: GatewayCall) -> GatewayResult<()> {
        let operation = call.operation();
        let latency = {
            let mut state = self.state.write().map_err(lock_error)?;
            state.calls.push(call);
            state.latency
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let mut state = self.state.write().map_err(lock_error)?;
        match state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn apply_move(&self, request: &MoveRequest) -> GatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let outcome =
            compute_move(&state.tasks, request).ok_or_else(|| not_found(request.dragged()))?;
        state.tasks = outcome.tasks;
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn list(&self, query: &ListQuery) -> GatewayResult<TaskPage> {
        self.begin(GatewayCall::List(query.clone())).await?;
        let state = self.state.read().map_err(lock_error)?;

        let mut matching: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| query.status.is_none_or(|status| task.status() == status))
            .filter(|task| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|keyword| task.matches_keyword(keyword))
            })
            .cloned()
            .collect();
        sort_tasks(&mut matching, SortPolicy::Manual);

        let page_size = usize::try_from(query.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .unwrap_or(usize::MAX);
        let page = usize::try_from(query.page.max(1)).unwrap_or(usize::MAX);
        let skip = page.saturating_sub(1).saturating_mul(page_size);
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let tasks = matching.into_iter().skip(skip).take(page_size).collect();
        Ok(TaskPage { tasks, total })
    }

    async fn create(&self, draft: &TaskDraft) -> GatewayResult<CreatedTask> {
        self.begin(GatewayCall::Create(draft.clone())).await?;
        draft.validate().map_err(|err| GatewayError::Rejected {
            status: 400,
            message: Some(err.to_string()),
        })?;

        let mut state = self.state.write().map_err(lock_error)?;
        let column_len = state
            .tasks
            .iter()
            .filter(|task| task.status() == draft.status())
            .count();
        let order_index = u32::try_from(column_len).ok();
        let task_id = TaskId::generate();
        state.tasks.push(Task::from_record(TaskRecord {
            id: task_id.clone(),
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            priority: draft.priority(),
            status: draft.status(),
            deadline: draft.deadline(),
            created_at: Utc::now(),
            order_index,
        }));
        Ok(CreatedTask {
            task_id,
            order_index,
        })
    }

    async fn update(&self, task: &Task) -> GatewayResult<()> {
        self.begin(GatewayCall::Update(task.clone())).await?;
        let previous_status = {
            let mut state = self.state.write().map_err(lock_error)?;
            let stored = state
                .tasks
                .iter_mut()
                .find(|stored| stored.id() == task.id())
                .ok_or_else(|| not_found(task.id()))?;
            let previous_status = stored.status();
            *stored = stored.revised(task.to_draft());
            stored.set_status(previous_status);
            previous_status
        };
        if previous_status != task.status() {
            self.apply_move(&MoveRequest::to_column_end(
                task.id().clone(),
                task.status(),
            ))?;
        }
        Ok(())
    }

    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()> {
        self.begin(GatewayCall::Delete(task_id.clone())).await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let position = state
            .tasks
            .iter()
            .position(|task| task.id() == task_id)
            .ok_or_else(|| not_found(task_id))?;
        let removed = state.tasks.remove(position);
        normalize_column(&mut state.tasks, removed.status());
        Ok(())
    }

    async fn update_status(&self, task_id: &TaskId, status: TaskStatus) -> GatewayResult<()> {
        self.begin(GatewayCall::UpdateStatus(task_id.clone(), status))
            .await?;
        self.apply_move(&MoveRequest::to_column_end(task_id.clone(), status))
    }

    async fn reorder(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
        order_index: u32,
    ) -> GatewayResult<()> {
        self.begin(GatewayCall::Reorder(MovePlan {
            task_id: task_id.clone(),
            status,
            order_index,
        }))
        .await?;

        let request = {
            let state = self.state.read().map_err(lock_error)?;
            MoveRequest::to_index(&state.tasks, task_id.clone(), status, order_index)
        };
        self.apply_move(&request)
    }
}
