//! Error types for board domain validation.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// An identifier was zero, negative, or outside the persisted range.
    #[error("invalid {kind} identifier {value}, expected a positive integer")]
    InvalidId {
        /// Identifier kind, for example `task` or `column`.
        kind: &'static str,
        /// Rejected raw value.
        value: i64,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The column color is not a `#rgb` or `#rrggbb` hex value.
    #[error("invalid column color '{0}', expected #rgb or #rrggbb")]
    InvalidColumnColor(String),

    /// The estimated hours value is negative or not finite.
    #[error("invalid estimated hours {0}, expected a finite non-negative number")]
    InvalidEstimatedHours(String),

    /// The task end date precedes its start date.
    #[error("task end date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Scheduled start date.
        start: chrono::NaiveDate,
        /// Scheduled end date.
        end: chrono::NaiveDate,
    },

    /// The priority value is not recognised.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// Two columns in one board share an identifier.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),
}

/// Errors raised when a cache write would break the board invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskCacheError {
    /// The task references a column that is not loaded on the board.
    #[error("task {task_id} references unknown column {status_id}")]
    UnknownColumn {
        /// Offending task.
        task_id: TaskId,
        /// Column identifier that has no loaded counterpart.
        status_id: ColumnId,
    },
}
