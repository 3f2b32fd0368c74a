//! Board loading, refreshing and invalidation.

use std::sync::Arc;
use thiserror::Error;

use super::BoardCache;
use crate::board::{
    domain::{BoardDomainError, ColumnSet, ProjectId, TaskCache, TaskCacheError, TaskId},
    ports::{RemoteStoreError, RemoteTaskStore},
};

/// Service-level errors for board loading.
#[derive(Debug, Error)]
pub enum BoardLoadError {
    /// The column payload violates board rules.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The remote store could not provide the board.
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
}

/// Result type for board loading operations.
pub type BoardLoadResult<T> = Result<T, BoardLoadError>;

/// Summary of one successful board load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLoadReport {
    /// Project whose board was loaded.
    pub project_id: ProjectId,
    /// Number of loaded columns.
    pub columns: usize,
    /// Number of cached tasks.
    pub tasks: usize,
    /// Tasks left out because their status is not a loaded column.
    pub skipped: Vec<TaskId>,
}

/// Fills the shared cache from the remote store.
pub struct BoardLoader<S>
where
    S: RemoteTaskStore,
{
    cache: BoardCache,
    store: Arc<S>,
}

impl<S> BoardLoader<S>
where
    S: RemoteTaskStore,
{
    /// Creates a loader writing into `cache`.
    #[must_use]
    pub const fn new(cache: BoardCache, store: Arc<S>) -> Self {
        Self { cache, store }
    }

    /// Fetches columns and tasks and replaces the cache with the result.
    ///
    /// Tasks whose status has no loaded column are skipped. On error the
    /// current cache is kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLoadError`] when either fetch fails or the columns are
    /// not unique.
    pub async fn load(&self, project_id: ProjectId) -> BoardLoadResult<BoardLoadReport> {
        let (columns, tasks) = tokio::try_join!(
            self.store.fetch_columns(),
            self.store.fetch_tasks(project_id)
        )?;

        let mut cache = TaskCache::new(ColumnSet::new(columns)?);
        let mut skipped = Vec::new();
        for task in tasks {
            if let Err(TaskCacheError::UnknownColumn { task_id, status_id }) = cache.insert(task) {
                tracing::warn!(%project_id, %task_id, %status_id, "task references unknown column");
                skipped.push(task_id);
            }
        }

        let report = BoardLoadReport {
            project_id,
            columns: cache.columns().len(),
            tasks: cache.len(),
            skipped,
        };
        self.cache.replace(cache);
        tracing::info!(
            %project_id,
            columns = report.columns,
            tasks = report.tasks,
            skipped = report.skipped.len(),
            "board loaded"
        );
        Ok(report)
    }

    /// Refetches the board after an explicit invalidation request.
    ///
    /// In-flight updates started before the refresh become superseded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLoadError`] under the same conditions as
    /// [`BoardLoader::load`].
    pub async fn refresh(&self, project_id: ProjectId) -> BoardLoadResult<BoardLoadReport> {
        tracing::debug!(%project_id, "refreshing board");
        self.load(project_id).await
    }

    /// Discards the cache, as when the user navigates away from the board.
    pub fn invalidate(&self) {
        self.cache.clear();
        tracing::debug!("board cache discarded");
    }
}
