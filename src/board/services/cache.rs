//! Shared holder for the board's task cache.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::domain::{BoardTask, TaskCache, TaskCacheError, TaskId};

/// Injectable, shared handle to the current [`TaskCache`].
///
/// Clones share the same cache. Writers compute a complete replacement value
/// and swap it in while holding the write guard, so readers only ever see
/// whole snapshots.
#[derive(Debug, Clone, Default)]
pub struct BoardCache {
    inner: Arc<RwLock<TaskCache>>,
}

impl BoardCache {
    /// Creates a holder with an empty, unloaded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a holder around an existing cache.
    #[must_use]
    pub fn with_cache(cache: TaskCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    // A poisoned guard still holds the last fully swapped-in value.
    fn read_guard(&self) -> RwLockReadGuard<'_, TaskCache> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, TaskCache> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TaskCache {
        self.read_guard().clone()
    }

    /// Runs `f` against the current snapshot without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&TaskCache) -> R) -> R {
        f(&self.read_guard())
    }

    /// Looks up one task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<BoardTask> {
        self.read_guard().get(id).cloned()
    }

    /// Replaces the whole cache, as a refetch does.
    pub fn replace(&self, cache: TaskCache) {
        *self.write_guard() = cache;
    }

    /// Discards all cached columns and tasks.
    pub fn clear(&self) {
        self.replace(TaskCache::default());
    }

    /// Inserts or refreshes a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCacheError::UnknownColumn`] when the task's status is not
    /// a loaded column; the cache is left untouched.
    pub fn upsert_task(&self, task: BoardTask) -> Result<Option<BoardTask>, TaskCacheError> {
        self.write_guard().insert(task)
    }

    /// Removes a task, for example after a concurrent deletion.
    pub fn remove_task(&self, id: TaskId) -> Option<BoardTask> {
        self.write_guard().remove(id)
    }

    /// Computes a successor cache from the current one and swaps it in.
    ///
    /// `f` returns `None` to leave the cache as it is.
    pub(crate) fn transition<R>(&self, f: impl FnOnce(&TaskCache) -> (Option<TaskCache>, R)) -> R {
        let mut guard = self.write_guard();
        let (next, result) = f(&guard);
        if let Some(cache) = next {
            *guard = cache;
        }
        result
    }
}
