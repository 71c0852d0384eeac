//! JSON wire models for the task backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{
    domain::{Priority, Task, TaskDraft, TaskId, TaskRecord, TaskStatus},
    ports::{CreatedTask, GatewayError, GatewayResult, TaskPage},
};

/// Task identifier as sent by the backend, which may use numeric keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    /// Numeric key.
    Number(i64),
    /// String key.
    Text(String),
}

impl From<WireId> for TaskId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Number(number) => Self::new(number.to_string()),
            WireId::Text(text) => Self::new(text),
        }
    }
}

/// Sends canonical integer ids back as JSON numbers so numeric keys survive
/// a round trip.
impl From<&TaskId> for WireId {
    fn from(task_id: &TaskId) -> Self {
        let raw = task_id.as_str();
        match raw.parse::<i64>() {
            Ok(number) if number.to_string() == raw => Self::Number(number),
            _ => Self::Text(raw.to_owned()),
        }
    }
}

/// Task as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Backend identifier.
    pub task_id: WireId,
    /// Title.
    pub title: String,
    /// Description; absent or null means empty.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority, 1 to 3.
    pub priority: u8,
    /// Status, 0 to 2.
    pub status: u8,
    /// ISO-8601 deadline.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// ISO-8601 creation time.
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    /// Position within the status column.
    #[serde(default)]
    pub order_index: Option<u32>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id().into(),
            title: task.title().to_owned(),
            description: Some(task.description().to_owned()),
            priority: task.priority().value(),
            status: task.status().value(),
            deadline: task.deadline(),
            create_time: Some(task.created_at()),
            order_index: task.order_index(),
        }
    }
}

/// Converts a backend row into a domain task.
///
/// A missing creation time falls back to the Unix epoch so such tasks sort
/// as oldest.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidResponse`] when priority or status are out
/// of range.
pub fn row_to_task(row: TaskRow) -> GatewayResult<Task> {
    let TaskRow {
        task_id,
        title,
        description,
        priority: raw_priority,
        status: raw_status,
        deadline,
        create_time,
        order_index,
    } = row;

    let priority = Priority::try_from(raw_priority).map_err(invalid_response)?;
    let status = TaskStatus::try_from(raw_status).map_err(invalid_response)?;
    Ok(Task::from_record(TaskRecord {
        id: task_id.into(),
        title,
        description: description.unwrap_or_default(),
        priority,
        status,
        deadline,
        created_at: create_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        order_index,
    }))
}

fn invalid_response(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::InvalidResponse(err.to_string())
}

/// Body of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListBody {
    /// Page, starting at 1.
    pub page: u32,
    /// Page size.
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Column filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    /// Keyword filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of a list response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListResponse {
    /// Tasks on the page.
    pub tasks: Vec<TaskRow>,
    /// Size of the filtered set.
    pub total: u64,
}

impl ListResponse {
    /// Converts the response into a domain page.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidResponse`] when any row is invalid.
    pub fn into_page(self) -> GatewayResult<TaskPage> {
        let tasks = self
            .tasks
            .into_iter()
            .map(row_to_task)
            .collect::<GatewayResult<Vec<_>>>()?;
        Ok(TaskPage {
            tasks,
            total: self.total,
        })
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBody {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority, 1 to 3.
    pub priority: u8,
    /// Status, 0 to 2.
    pub status: u8,
    /// ISO-8601 deadline or null.
    pub deadline: Option<DateTime<Utc>>,
}

impl From<&TaskDraft> for CreateBody {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            priority: draft.priority().value(),
            status: draft.status().value(),
            deadline: draft.deadline(),
        }
    }
}

/// Body of a create response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateResponse {
    /// Identifier issued by the backend.
    #[serde(alias = "taskId")]
    pub task_id: WireId,
    /// Assigned column position.
    #[serde(default, alias = "orderIndex")]
    pub order_index: Option<u32>,
}

impl From<CreateResponse> for CreatedTask {
    fn from(response: CreateResponse) -> Self {
        Self {
            task_id: response.task_id.into(),
            order_index: response.order_index,
        }
    }
}

/// Body identifying a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskIdBody {
    /// Task identifier.
    pub task_id: WireId,
}

/// Body of a status-only update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatusBody {
    /// Task identifier.
    pub task_id: WireId,
    /// New status, 0 to 2.
    pub status: u8,
}

/// Body of a reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderBody {
    /// Task identifier.
    pub task_id: WireId,
    /// Destination status, 0 to 2.
    pub new_status: u8,
    /// Destination position.
    pub new_index: u32,
}

/// Conventional error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Extracts the `message` field from an error response body, if any.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
}
