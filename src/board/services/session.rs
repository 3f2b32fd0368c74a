//! Board session: drag tracking wired to loading and reconciliation.

use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

use super::{
    BoardCache, BoardLoadReport, BoardLoadResult, BoardLoader, BoardReconciler, DropOutcome,
    DropResolution, IgnoredDrop,
};
use crate::{
    board::{
        adapters::http::HttpTaskStore,
        domain::{ColumnId, DragTracker, ProjectId, Reconciliation, TaskId},
        ports::{FailureNotifier, RemoteStoreResult, RemoteTaskStore},
    },
    config::BoardConfig,
};

/// One open board: its cache, the pointer drag in progress, and the services
/// that keep both in step with the remote store.
pub struct BoardSession<S, N, C>
where
    S: RemoteTaskStore,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    project_id: ProjectId,
    loader: BoardLoader<S>,
    reconciler: BoardReconciler<S, N, C>,
    drag: Mutex<DragTracker>,
}

impl<S, N, C> BoardSession<S, N, C>
where
    S: RemoteTaskStore,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    /// Opens a session for a project. The board is empty until
    /// [`BoardSession::load`] completes.
    #[must_use]
    pub fn new(project_id: ProjectId, store: Arc<S>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        let cache = BoardCache::new();
        Self {
            project_id,
            loader: BoardLoader::new(cache.clone(), Arc::clone(&store)),
            reconciler: BoardReconciler::new(cache, store, notifier, clock),
            drag: Mutex::new(DragTracker::new()),
        }
    }

    /// Replaces the message carried by failure notices.
    #[must_use]
    pub fn with_failure_message(mut self, message: impl AsRef<str>) -> Self {
        self.reconciler = self.reconciler.with_failure_message(message);
        self
    }

    fn drag(&self) -> MutexGuard<'_, DragTracker> {
        self.drag.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the project shown on this board.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the shared cache.
    #[must_use]
    pub const fn cache(&self) -> &BoardCache {
        self.reconciler.cache()
    }

    /// Returns the reconciler, for callers that drive drops directly.
    #[must_use]
    pub const fn reconciler(&self) -> &BoardReconciler<S, N, C> {
        &self.reconciler
    }

    /// Loads the board.
    ///
    /// # Errors
    ///
    /// Propagates [`super::BoardLoadError`] from the loader.
    pub async fn load(&self) -> BoardLoadResult<BoardLoadReport> {
        self.loader.load(self.project_id).await
    }

    /// Refetches the board.
    ///
    /// # Errors
    ///
    /// Propagates [`super::BoardLoadError`] from the loader.
    pub async fn refresh(&self) -> BoardLoadResult<BoardLoadReport> {
        self.loader.refresh(self.project_id).await
    }

    /// Closes the board: drops any drag and discards the cache.
    pub fn close(&self) {
        self.drag().cancel();
        self.loader.invalidate();
    }

    /// Starts dragging a card. See [`DragTracker::begin_drag`].
    pub fn begin_drag(&self, raw_task_id: i64) -> Option<TaskId> {
        let cache = self.cache().snapshot();
        self.drag().begin_drag(&cache, raw_task_id)
    }

    /// Records the column under the pointer.
    pub fn hover(&self, raw_column_id: Option<i64>) {
        let cache = self.cache().snapshot();
        self.drag().hover(&cache, raw_column_id);
    }

    /// Returns the column under the pointer, if any.
    #[must_use]
    pub fn hovered_column(&self) -> Option<ColumnId> {
        self.drag().hovered_column()
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub fn dragged_task(&self) -> Option<TaskId> {
        self.drag().active_task()
    }

    /// Abandons the current drag.
    pub fn cancel_drag(&self) {
        self.drag().cancel();
    }

    fn end_drag(&self, raw_task_id: i64, raw_target: Option<i64>) -> Option<(TaskId, ColumnId)> {
        let cache = self.cache().snapshot();
        let target = self.drag().end_drag(&cache, raw_task_id, raw_target)?;
        TaskId::from_raw(raw_task_id).map(|task_id| (task_id, target))
    }

    /// Ends the drag and applies the optimistic write only.
    ///
    /// The returned pending update is settled through
    /// [`BoardReconciler::settle`].
    #[must_use]
    pub fn release_card(&self, raw_task_id: i64, raw_target: Option<i64>) -> DropOutcome {
        match self.end_drag(raw_task_id, raw_target) {
            Some((task_id, target)) => self.reconciler.begin_drop(task_id, Some(target)),
            None => DropOutcome::Ignored(IgnoredDrop::NoTarget),
        }
    }

    /// Ends the drag and settles the drop to completion.
    pub async fn drop_card_and_settle(
        &self,
        raw_task_id: i64,
        raw_target: Option<i64>,
    ) -> DropResolution {
        match self.end_drag(raw_task_id, raw_target) {
            Some((task_id, target)) => {
                self.reconciler
                    .drop_and_settle(task_id, Some(target))
                    .await
            }
            None => DropResolution::Ignored(IgnoredDrop::NoTarget),
        }
    }
}

impl<S, N, C> BoardSession<S, N, C>
where
    S: RemoteTaskStore + 'static,
    N: FailureNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Ends the drag and hands the drop to the reconciler, fire-and-forget.
    ///
    /// Returns the settlement handle when a remote update was dispatched.
    /// Outside a tokio runtime the drag ends but no move is applied; see
    /// [`BoardReconciler::handle_drop`].
    pub fn drop_card(
        &self,
        raw_task_id: i64,
        raw_target: Option<i64>,
    ) -> Option<JoinHandle<Reconciliation>> {
        let (task_id, target) = self.end_drag(raw_task_id, raw_target)?;
        self.reconciler.handle_drop(task_id, Some(target))
    }
}

impl<N, C> BoardSession<HttpTaskStore, N, C>
where
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    /// Opens a session against the REST API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::board::ports::RemoteStoreError::Transport`] when the
    /// HTTP client cannot be built.
    pub fn connect(
        project_id: ProjectId,
        config: &BoardConfig,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> RemoteStoreResult<Self> {
        let store = HttpTaskStore::new(config.api.clone())?;
        Ok(Self::new(project_id, Arc::new(store), notifier, clock)
            .with_failure_message(&config.failure_message))
    }
}
