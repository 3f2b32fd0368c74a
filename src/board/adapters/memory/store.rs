//! In-memory remote task store with scriptable failures.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::board::{
    domain::{BoardColumn, BoardTask, ColumnId, ProjectId, TaskId},
    ports::{RemoteStoreError, RemoteStoreResult, RemoteTaskStore},
};

/// One recorded call to [`RemoteTaskStore::update_task_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdateCall {
    /// Task the update targeted.
    pub task_id: TaskId,
    /// Requested status.
    pub status_id: ColumnId,
}

/// Thread-safe in-memory stand-in for the REST API.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<Mutex<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    columns: Vec<BoardColumn>,
    tasks: BTreeMap<TaskId, (ProjectId, BoardTask)>,
    scripted_failures: VecDeque<RemoteStoreError>,
    failing_tasks: HashMap<TaskId, RemoteStoreError>,
    update_log: Vec<StatusUpdateCall>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation below completes before the guard drops, so a poisoned
    // lock still guards consistent state.
    fn state(&self) -> MutexGuard<'_, InMemoryStoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a column to the board.
    pub fn seed_column(&self, column: BoardColumn) {
        self.state().columns.push(column);
    }

    /// Stores a task under a project, replacing any task with the same id.
    pub fn seed_task(&self, project_id: ProjectId, task: BoardTask) {
        self.state().tasks.insert(task.id(), (project_id, task));
    }

    /// Deletes a task, as a concurrent user would.
    pub fn delete_task(&self, task_id: TaskId) -> Option<BoardTask> {
        self.state().tasks.remove(&task_id).map(|(_, task)| task)
    }

    /// Makes the next status update fail with `error`, whatever its task.
    pub fn fail_next_update(&self, error: RemoteStoreError) {
        self.state().scripted_failures.push_back(error);
    }

    /// Makes every status update of `task_id` fail with `error`.
    pub fn fail_updates_for(&self, task_id: TaskId, error: RemoteStoreError) {
        self.state().failing_tasks.insert(task_id, error);
    }

    /// Removes all scripted failures.
    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.scripted_failures.clear();
        state.failing_tasks.clear();
    }

    /// Returns every status update received, in arrival order.
    #[must_use]
    pub fn update_calls(&self) -> Vec<StatusUpdateCall> {
        self.state().update_log.clone()
    }

    /// Returns the stored version of a task.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<BoardTask> {
        self.state().tasks.get(&task_id).map(|(_, task)| task.clone())
    }
}

#[async_trait]
impl RemoteTaskStore for InMemoryTaskStore {
    async fn fetch_columns(&self) -> RemoteStoreResult<Vec<BoardColumn>> {
        Ok(self.state().columns.clone())
    }

    async fn fetch_tasks(&self, project_id: ProjectId) -> RemoteStoreResult<Vec<BoardTask>> {
        let state = self.state();
        Ok(state
            .tasks
            .values()
            .filter(|(owner, _)| *owner == project_id)
            .map(|(_, task)| task.clone())
            .collect())
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status_id: ColumnId,
    ) -> RemoteStoreResult<()> {
        let mut state = self.state();
        state.update_log.push(StatusUpdateCall { task_id, status_id });

        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }
        if let Some(error) = state.failing_tasks.get(&task_id) {
            return Err(error.clone());
        }
        if !state.columns.iter().any(|column| column.id() == status_id) {
            return Err(RemoteStoreError::Rejected {
                status: 422,
                message: Some(format!("unknown status {status_id}")),
            });
        }

        let (_, task) = state
            .tasks
            .get_mut(&task_id)
            .ok_or(RemoteStoreError::NotFound(task_id))?;
        *task = task.moved_to(status_id);
        Ok(())
    }
}
