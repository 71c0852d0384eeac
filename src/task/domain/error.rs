//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The priority value is outside the supported range.
    #[error("invalid priority {0}, expected 1 (low), 2 (medium) or 3 (high)")]
    InvalidPriority(u8),

    /// The status value does not name a board column.
    #[error("invalid status {0}, expected 0 (todo), 1 (in progress) or 2 (done)")]
    InvalidStatus(u8),
}

/// Error returned while parsing a sort policy key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort policy: {0}")]
pub struct ParseSortPolicyError(pub String);
