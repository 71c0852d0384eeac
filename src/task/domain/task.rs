//! Task entity and the enumerations that place it on the board.

use super::{TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    /// Low priority.
    Low = 1,
    /// Medium priority, the default for new tasks.
    #[default]
    Medium = 2,
    /// High priority.
    High = 3,
}

impl Priority {
    /// Returns the numeric wire value.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(TaskDomainError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.value()
    }
}

/// Board column a task belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo = 0,
    /// Being worked on.
    InProgress = 1,
    /// Finished.
    Done = 2,
}

impl TaskStatus {
    /// Every column, in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the numeric wire value.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Todo),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Done),
            other => Err(TaskDomainError::InvalidStatus(other)),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(value: TaskStatus) -> Self {
        value.value()
    }
}

/// User-editable task fields, as submitted by the task form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the given title, medium priority and todo status.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: TaskStatus::default(),
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Checks the draft can be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

/// A task card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    order_index: Option<u32>,
}

/// Parameter object for reconstructing a task returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Backend task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Status column.
    pub status: TaskStatus,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Position within the status column, when known.
    pub order_index: Option<u32>,
}

impl Task {
    /// Builds the local copy of a task the backend has just created.
    #[must_use]
    pub fn from_created(
        id: TaskId,
        draft: TaskDraft,
        order_index: Option<u32>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            deadline: draft.deadline,
            created_at: clock.utc(),
            order_index,
        }
    }

    /// Reconstructs a task from backend data.
    #[must_use]
    pub fn from_record(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            priority: record.priority,
            status: record.status,
            deadline: record.deadline,
            created_at: record.created_at,
            order_index: record.order_index,
        }
    }

    /// Returns a copy with the editable fields replaced by `draft`.
    ///
    /// Identity, creation time and position are preserved.
    #[must_use]
    pub fn revised(&self, draft: TaskDraft) -> Self {
        Self {
            id: self.id.clone(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            deadline: draft.deadline,
            created_at: self.created_at,
            order_index: self.order_index,
        }
    }

    /// Returns the editable fields as a draft.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            deadline: self.deadline,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the position within the status column, when known.
    #[must_use]
    pub const fn order_index(&self) -> Option<u32> {
        self.order_index
    }

    /// Returns whether the title or description contains `keyword`,
    /// ignoring case.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) const fn set_order_index(&mut self, order_index: Option<u32>) {
        self.order_index = order_index;
    }
}
