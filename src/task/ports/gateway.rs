//! Gateway port for the remote task backend.

use crate::task::domain::{Task, TaskDraft, TaskId, TaskStatus};
use async_trait::async_trait;
use thiserror::Error;

/// Message shown when the backend gives no explanation for a failure.
pub const DEFAULT_ERROR_MESSAGE: &str = "network error";

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Parameters of a paged list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// Page to fetch, starting at 1.
    pub page: u32,
    /// Page size; the backend default applies when absent.
    pub page_size: Option<u32>,
    /// Restricts the listing to one column.
    pub status: Option<TaskStatus>,
    /// Full-text keyword; absent means unfiltered.
    pub search: Option<String>,
}

impl ListQuery {
    /// Creates an unfiltered query for `page`.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self {
            page,
            page_size: None,
            status: None,
            search: None,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Restricts the query to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: Option<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    /// Filters by `keyword`; an empty keyword leaves the query unfiltered.
    #[must_use]
    pub fn with_search(mut self, keyword: &str) -> Self {
        self.search = (!keyword.is_empty()).then(|| keyword.to_owned());
        self
    }
}

/// One page of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPage {
    /// Tasks on this page.
    pub tasks: Vec<Task>,
    /// Size of the whole filtered set.
    pub total: u64,
}

/// Backend acknowledgement of a created task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTask {
    /// Identifier issued by the backend.
    pub task_id: TaskId,
    /// Column position assigned by the backend.
    pub order_index: Option<u32>,
}

/// Remote task backend contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists one page of tasks.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails.
    async fn list(&self, query: &ListQuery) -> GatewayResult<TaskPage>;

    /// Creates a task; the backend assigns its identifier and position.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or is rejected.
    async fn create(&self, draft: &TaskDraft) -> GatewayResult<CreatedTask>;

    /// Replaces every field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or is rejected.
    async fn update(&self, task: &Task) -> GatewayResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or is rejected.
    async fn delete(&self, task_id: &TaskId) -> GatewayResult<()>;

    /// Moves a task to another column without an explicit position.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or is rejected.
    async fn update_status(&self, task_id: &TaskId, status: TaskStatus) -> GatewayResult<()>;

    /// Persists a drag-and-drop move.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request fails or is rejected.
    async fn reorder(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
        order_index: u32,
    ) -> GatewayResult<()>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}: {}", .message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, if any.
        message: Option<String>,
    },

    /// The backend answered with a body that could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Returns the text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => DEFAULT_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Returns whether the backend rejected the request's content.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Rejected { status: 400 | 422, .. })
    }
}
