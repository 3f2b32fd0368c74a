//! Optimistic drop handling and reconciliation with the remote store.
//!
//! A drop moves the task in the shared cache before any network I/O. The
//! remote update then either confirms the move or, on failure, restores the
//! previous column and raises exactly one failure notice. Responses that
//! arrive after the task moved on are ignored.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};

use super::BoardCache;
use crate::{
    board::{
        domain::{
            ColumnId, OptimisticWrite, Reconciliation, RemoteOutcome, RollbackToken, TaskId,
        },
        ports::{FailureNotice, FailureNotifier, RemoteTaskStore},
    },
    config::DEFAULT_FAILURE_MESSAGE,
};

/// Why a drop left the cache untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredDrop {
    /// The drop did not land on a valid column.
    NoTarget,
    /// The task already sits in the target column.
    SameColumn,
    /// The task is no longer cached.
    StaleTask,
    /// The target column is not loaded.
    UnknownColumn,
}

impl IgnoredDrop {
    /// Returns the canonical log representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTarget => "no_target",
            Self::SameColumn => "same_column",
            Self::StaleTask => "stale_task",
            Self::UnknownColumn => "unknown_column",
        }
    }
}

impl fmt::Display for IgnoredDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optimistic write awaiting its remote outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    token: RollbackToken,
    dispatched_at: DateTime<Utc>,
}

impl PendingUpdate {
    /// Returns the rollback token of the write.
    #[must_use]
    pub const fn token(&self) -> &RollbackToken {
        &self.token
    }

    /// Returns when the optimistic write was applied.
    #[must_use]
    pub const fn dispatched_at(&self) -> DateTime<Utc> {
        self.dispatched_at
    }
}

/// Immediate result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing changed and no remote call is needed.
    Ignored(IgnoredDrop),
    /// The cache shows the move; the remote update is still to be settled.
    Pending(PendingUpdate),
}

/// Final result of a drop, once settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropResolution {
    /// Nothing changed and no remote call was made.
    Ignored(IgnoredDrop),
    /// The remote call resolved and was reconciled.
    Settled(Reconciliation),
}

/// Applies drops to the shared cache and reconciles them with the remote
/// store.
pub struct BoardReconciler<S, N, C>
where
    S: RemoteTaskStore,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    cache: BoardCache,
    store: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<C>,
    failure_message: Arc<str>,
}

impl<S, N, C> Clone for BoardReconciler<S, N, C>
where
    S: RemoteTaskStore,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            clock: Arc::clone(&self.clock),
            failure_message: Arc::clone(&self.failure_message),
        }
    }
}

impl<S, N, C> BoardReconciler<S, N, C>
where
    S: RemoteTaskStore,
    N: FailureNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler over a shared cache.
    #[must_use]
    pub fn new(cache: BoardCache, store: Arc<S>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            cache,
            store,
            notifier,
            clock,
            failure_message: Arc::from(DEFAULT_FAILURE_MESSAGE),
        }
    }

    /// Replaces the message carried by failure notices.
    #[must_use]
    pub fn with_failure_message(mut self, message: impl AsRef<str>) -> Self {
        self.failure_message = Arc::from(message.as_ref());
        self
    }

    /// Returns the shared cache.
    #[must_use]
    pub const fn cache(&self) -> &BoardCache {
        &self.cache
    }

    /// Applies the optimistic write for a drop. Performs no I/O.
    #[must_use]
    pub fn begin_drop(&self, task_id: TaskId, target: Option<ColumnId>) -> DropOutcome {
        let Some(target_id) = target else {
            tracing::debug!(%task_id, "drop outside any column ignored");
            return DropOutcome::Ignored(IgnoredDrop::NoTarget);
        };

        let write = self.cache.transition(|cache| {
            match cache.apply_optimistic(task_id, target_id) {
                OptimisticWrite::Applied { cache: next, token } => (Some(next), Ok(token)),
                OptimisticWrite::Unchanged => (None, Err(IgnoredDrop::SameColumn)),
                OptimisticWrite::StaleTask => (None, Err(IgnoredDrop::StaleTask)),
                OptimisticWrite::UnknownColumn => (None, Err(IgnoredDrop::UnknownColumn)),
            }
        });

        match write {
            Ok(token) => {
                tracing::debug!(
                    update_id = %token.update_id(),
                    %task_id,
                    from = %token.previous_status(),
                    to = %token.applied_status(),
                    "task moved optimistically"
                );
                DropOutcome::Pending(PendingUpdate {
                    token,
                    dispatched_at: self.clock.utc(),
                })
            }
            Err(reason) => {
                tracing::debug!(%task_id, to = %target_id, %reason, "drop ignored");
                DropOutcome::Ignored(reason)
            }
        }
    }

    /// Sends the remote update for a pending write and reconciles the cache.
    pub async fn settle(&self, pending: PendingUpdate) -> Reconciliation {
        let PendingUpdate { token, .. } = pending;
        let outcome = match self
            .store
            .update_task_status(token.task_id(), token.applied_status())
            .await
        {
            Ok(()) => RemoteOutcome::Succeeded,
            Err(err) => {
                tracing::warn!(
                    update_id = %token.update_id(),
                    task_id = %token.task_id(),
                    error = %err,
                    "remote status update failed"
                );
                RemoteOutcome::Failed
            }
        };

        let result = self.cache.transition(|cache| {
            let (next, result) = cache.reconcile(&token, outcome);
            let replacement = (result == Reconciliation::RolledBack).then_some(next);
            (replacement, result)
        });

        tracing::debug!(
            update_id = %token.update_id(),
            task_id = %token.task_id(),
            %result,
            "drop reconciled"
        );
        if result == Reconciliation::RolledBack {
            self.notifier.notify_failure(&FailureNotice {
                update_id: token.update_id(),
                task_id: token.task_id(),
                restored_status: token.previous_status(),
                message: self.failure_message.to_string(),
                occurred_at: self.clock.utc(),
            });
        }
        result
    }

    /// Applies a drop and settles it to completion.
    pub async fn drop_and_settle(&self, task_id: TaskId, target: Option<ColumnId>) -> DropResolution {
        match self.begin_drop(task_id, target) {
            DropOutcome::Ignored(reason) => DropResolution::Ignored(reason),
            DropOutcome::Pending(pending) => DropResolution::Settled(self.settle(pending).await),
        }
    }
}

impl<S, N, C> BoardReconciler<S, N, C>
where
    S: RemoteTaskStore + 'static,
    N: FailureNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Fire-and-forget drop entry point.
    ///
    /// The cache reflects the move before this returns. Settlement runs on a
    /// task spawned onto the current tokio runtime, and its handle may be
    /// awaited or dropped. Returns `None` when the drop was ignored, or when
    /// no runtime is available; in that case the cache is left untouched.
    pub fn handle_drop(
        &self,
        task_id: TaskId,
        target: Option<ColumnId>,
    ) -> Option<JoinHandle<Reconciliation>> {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(%task_id, "drop received outside a tokio runtime; ignored");
            return None;
        };
        match self.begin_drop(task_id, target) {
            DropOutcome::Ignored(_) => None,
            DropOutcome::Pending(pending) => {
                let reconciler = self.clone();
                Some(runtime.spawn(async move { reconciler.settle(pending).await }))
            }
        }
    }
}
