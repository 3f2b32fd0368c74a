//! User-facing failure notification port.

use crate::board::domain::{ColumnId, TaskId, UpdateId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Notice raised when a task move had to be reverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureNotice {
    /// Update that failed.
    #[serde(serialize_with = "serialize_update_id")]
    pub update_id: UpdateId,
    /// Task that was moved back.
    pub task_id: TaskId,
    /// Column the task was restored to.
    pub restored_status: ColumnId,
    /// Generic message for the user.
    pub message: String,
    /// Time the rollback happened.
    pub occurred_at: DateTime<Utc>,
}

fn serialize_update_id<S>(id: &UpdateId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(id)
}

/// Sink for user-visible failure notifications.
pub trait FailureNotifier: Send + Sync {
    /// Surfaces one failure to the user.
    fn notify_failure(&self, notice: &FailureNotice);
}
