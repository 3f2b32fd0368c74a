//! Remote task store port: the REST API that owns task records.

use crate::board::domain::{BoardColumn, BoardTask, ColumnId, ProjectId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote task store operations.
pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Contract of the remote store backing a board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteTaskStore: Send + Sync {
    /// Fetches the board columns (task statuses) in display order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the request fails or the payload does
    /// not validate.
    async fn fetch_columns(&self) -> RemoteStoreResult<Vec<BoardColumn>>;

    /// Fetches every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the request fails or the payload does
    /// not validate.
    async fn fetch_tasks(&self, project_id: ProjectId) -> RemoteStoreResult<Vec<BoardTask>>;

    /// Persists a new status for one task.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError`] when the store rejects the update or cannot
    /// be reached.
    async fn update_task_status(
        &self,
        task_id: TaskId,
        status_id: ColumnId,
    ) -> RemoteStoreResult<()>;
}

/// Errors returned by remote task store implementations.
#[derive(Debug, Clone, Error)]
pub enum RemoteStoreError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The session is missing or lacks permission.
    #[error("not authorized (HTTP {status})")]
    Unauthorized {
        /// HTTP status code.
        status: u16,
    },

    /// The task does not exist remotely.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store answered with a failure status.
    #[error("request rejected (HTTP {status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, if any.
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl RemoteStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
