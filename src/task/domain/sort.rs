//! Sort policies for the task collection.
//!
//! Every policy groups by status first, so sorting only ever reorders cards
//! within a column. Ties compare as equal and [`sort_tasks`] is stable, which
//! keeps untouched cards in place across repeated sorts.

use super::{ParseSortPolicyError, Task, ordering::compare_order_index};
use std::cmp::Ordering;

/// Selectable ordering of cards within a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortPolicy {
    /// Manual drag-and-drop order (`order_index`, unknown last).
    #[default]
    Manual,
    /// High priority first, then manual order.
    ByPriority,
    /// Newest first.
    ByCreateTime,
    /// Earliest deadline first, tasks without a deadline last.
    ByDeadline,
}

impl SortPolicy {
    /// Returns the key used by the sort menu.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::ByPriority => "priority",
            Self::ByCreateTime => "createTime",
            Self::ByDeadline => "deadline",
        }
    }
}

impl TryFrom<&str> for SortPolicy {
    type Error = ParseSortPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "manual" => Ok(Self::Manual),
            "priority" => Ok(Self::ByPriority),
            "createTime" | "create_time" => Ok(Self::ByCreateTime),
            "deadline" => Ok(Self::ByDeadline),
            _ => Err(ParseSortPolicyError(value.to_owned())),
        }
    }
}

/// Compares two tasks under `policy`.
#[must_use]
pub fn compare(a: &Task, b: &Task, policy: SortPolicy) -> Ordering {
    a.status().cmp(&b.status()).then_with(|| match policy {
        SortPolicy::Manual => compare_order_index(a.order_index(), b.order_index()),
        SortPolicy::ByPriority => b
            .priority()
            .cmp(&a.priority())
            .then_with(|| compare_order_index(a.order_index(), b.order_index())),
        SortPolicy::ByCreateTime => b.created_at().cmp(&a.created_at()),
        SortPolicy::ByDeadline => match (a.deadline(), b.deadline()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    })
}

/// Sorts `tasks` in place under `policy`, preserving the relative order of
/// equal tasks.
pub fn sort_tasks(tasks: &mut [Task], policy: SortPolicy) {
    tasks.sort_by(|a, b| compare(a, b, policy));
}
