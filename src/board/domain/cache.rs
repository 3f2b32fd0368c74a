//! Local task cache and the optimistic write / reconcile pair.
//!
//! [`TaskCache`] is a persistent value: [`TaskCache::apply_optimistic`] and
//! [`TaskCache::reconcile`] return new caches that share structure with the
//! input, so a drop that touches one task never copies the others. Every
//! write to an entry mints a fresh [`WriteStamp`]; reconciliation only acts
//! when the entry still carries the stamp recorded in its [`RollbackToken`].

use super::{BoardTask, ColumnId, ColumnSet, TaskCacheError, TaskId};
use im::OrdMap;
use std::fmt;
use uuid::Uuid;

/// Marker minted for every write to a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteStamp(Uuid);

impl WriteStamp {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Correlation identifier for one optimistic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateId(Uuid);

impl UpdateId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CacheEntry {
    task: BoardTask,
    stamp: WriteStamp,
}

impl CacheEntry {
    fn stamped(task: BoardTask) -> Self {
        Self {
            task,
            stamp: WriteStamp::fresh(),
        }
    }
}

/// Everything needed to confirm or revert one optimistic status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackToken {
    update_id: UpdateId,
    task_id: TaskId,
    previous_status: ColumnId,
    applied_status: ColumnId,
    stamp: WriteStamp,
}

impl RollbackToken {
    /// Returns the update correlation identifier.
    #[must_use]
    pub const fn update_id(&self) -> UpdateId {
        self.update_id
    }

    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the column the task left.
    #[must_use]
    pub const fn previous_status(&self) -> ColumnId {
        self.previous_status
    }

    /// Returns the column the task was optimistically moved to.
    #[must_use]
    pub const fn applied_status(&self) -> ColumnId {
        self.applied_status
    }
}

/// Result of attempting an optimistic status write.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimisticWrite {
    /// The write was applied to the returned cache.
    Applied {
        /// Cache with the task in its new column.
        cache: TaskCache,
        /// Token describing how to confirm or revert the write.
        token: RollbackToken,
    },
    /// The task already sits in the target column.
    Unchanged,
    /// The task is no longer cached.
    StaleTask,
    /// The target column is not loaded on the board.
    UnknownColumn,
}

/// Authoritative outcome of a remote status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The remote store accepted the update.
    Succeeded,
    /// The remote store rejected the update or could not be reached.
    Failed,
}

/// What reconciliation did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reconciliation {
    /// The optimistic write stands.
    Confirmed,
    /// The task was restored to its previous column.
    RolledBack,
    /// The entry moved on since the write; nothing was changed.
    Superseded,
}

impl Reconciliation {
    /// Returns the canonical log representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::RolledBack => "rolled_back",
            Self::Superseded => "superseded",
        }
    }
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the tasks shown on one board.
///
/// Every cached task's status references a column in [`TaskCache::columns`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCache {
    columns: ColumnSet,
    entries: OrdMap<TaskId, CacheEntry>,
}

impl TaskCache {
    /// Creates an empty cache for the given columns.
    #[must_use]
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            entries: OrdMap::new(),
        }
    }

    /// Returns the loaded columns.
    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Inserts or replaces a task, returning the previous record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCacheError::UnknownColumn`] when the task's status does
    /// not reference a loaded column.
    pub fn insert(&mut self, task: BoardTask) -> Result<Option<BoardTask>, TaskCacheError> {
        if !self.columns.contains(task.status_id()) {
            return Err(TaskCacheError::UnknownColumn {
                task_id: task.id(),
                status_id: task.status_id(),
            });
        }
        let previous = self
            .entries
            .insert(task.id(), CacheEntry::stamped(task))
            .map(|entry| entry.task);
        Ok(previous)
    }

    /// Removes a task, returning it when it was cached.
    pub fn remove(&mut self, id: TaskId) -> Option<BoardTask> {
        self.entries.remove(&id).map(|entry| entry.task)
    }

    /// Looks up a task.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&BoardTask> {
        self.entries.get(&id).map(|entry| &entry.task)
    }

    /// Returns `true` when the task is cached.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no tasks are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates tasks in identifier order.
    pub fn tasks(&self) -> impl Iterator<Item = &BoardTask> {
        self.entries.values().map(|entry| &entry.task)
    }

    /// Returns the tasks in one column, in identifier order.
    #[must_use]
    pub fn tasks_in_column(&self, column: ColumnId) -> Vec<&BoardTask> {
        self.tasks()
            .filter(|task| task.status_id() == column)
            .collect()
    }

    /// Moves a task to `target` ahead of remote confirmation.
    ///
    /// The returned cache differs from `self` only in the moved task's entry.
    #[must_use]
    pub fn apply_optimistic(&self, task_id: TaskId, target: ColumnId) -> OptimisticWrite {
        let Some(entry) = self.entries.get(&task_id) else {
            return OptimisticWrite::StaleTask;
        };
        if !self.columns.contains(target) {
            return OptimisticWrite::UnknownColumn;
        }
        let previous_status = entry.task.status_id();
        if previous_status == target {
            return OptimisticWrite::Unchanged;
        }

        let moved = CacheEntry::stamped(entry.task.moved_to(target));
        let token = RollbackToken {
            update_id: UpdateId::new(),
            task_id,
            previous_status,
            applied_status: target,
            stamp: moved.stamp,
        };
        let mut cache = self.clone();
        cache.entries.insert(task_id, moved);
        OptimisticWrite::Applied { cache, token }
    }

    /// Confirms or reverts the write described by `token`.
    ///
    /// Acts only when the task still carries the token's stamp and applied
    /// status; otherwise reports [`Reconciliation::Superseded`] and returns
    /// an unchanged cache.
    #[must_use]
    pub fn reconcile(&self, token: &RollbackToken, outcome: RemoteOutcome) -> (Self, Reconciliation) {
        let Some(entry) = self.entries.get(&token.task_id) else {
            return (self.clone(), Reconciliation::Superseded);
        };
        let still_current =
            entry.stamp == token.stamp && entry.task.status_id() == token.applied_status;
        if !still_current {
            return (self.clone(), Reconciliation::Superseded);
        }

        match outcome {
            RemoteOutcome::Succeeded => (self.clone(), Reconciliation::Confirmed),
            RemoteOutcome::Failed => {
                if !self.columns.contains(token.previous_status) {
                    return (self.clone(), Reconciliation::Superseded);
                }
                let restored = CacheEntry::stamped(entry.task.moved_to(token.previous_status));
                let mut cache = self.clone();
                cache.entries.insert(token.task_id, restored);
                (cache, Reconciliation::RolledBack)
            }
        }
    }
}
