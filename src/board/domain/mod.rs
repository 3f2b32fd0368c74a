//! Domain model for the task board.
//!
//! Holds the task and column records, the persistent [`TaskCache`] with its
//! optimistic write / reconcile pair, and the [`DragTracker`]. Nothing here
//! performs I/O.

mod cache;
mod column;
mod drag;
mod error;
mod ids;
mod task;

pub use cache::{
    OptimisticWrite, Reconciliation, RemoteOutcome, RollbackToken, TaskCache, UpdateId, WriteStamp,
};
pub use column::{BoardColumn, ColumnColor, ColumnName, ColumnSet};
pub use drag::DragTracker;
pub use error::{BoardDomainError, TaskCacheError};
pub use ids::{ColumnId, ProjectId, TaskId, UserId};
pub use task::{BoardTask, EstimatedHours, TaskPriority, TaskTitle};
