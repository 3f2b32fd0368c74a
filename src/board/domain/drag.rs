//! Pointer drag session tracking.
//!
//! The tracker sits at the UI boundary and accepts the loosely typed ids that
//! drag payloads carry. Malformed or stale ids never fail; they resolve to
//! "no drag" or "no target".

use super::{ColumnId, TaskCache, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    task_id: TaskId,
    hovered: Option<ColumnId>,
}

/// Tracks the task currently being dragged and the column under the pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    /// Creates a tracker with no active drag.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Starts dragging the card with `raw_task_id`.
    ///
    /// Returns the tracked task, or `None` (leaving the tracker untouched) when
    /// the id is malformed or the task is not cached.
    pub fn begin_drag(&mut self, cache: &TaskCache, raw_task_id: i64) -> Option<TaskId> {
        let task_id = TaskId::from_raw(raw_task_id).filter(|id| cache.contains(*id))?;
        self.active = Some(ActiveDrag {
            task_id,
            hovered: None,
        });
        Some(task_id)
    }

    /// Records the column under the pointer, for drop-target highlighting.
    ///
    /// The hovered column never decides a drop: [`DragTracker::end_drag`]
    /// only uses the target reported at release, so a release outside every
    /// column is ignored even after hovering one.
    pub fn hover(&mut self, cache: &TaskCache, raw_column_id: Option<i64>) {
        if let Some(active) = self.active.as_mut() {
            active.hovered = raw_column_id.and_then(|raw| cache.columns().resolve(raw));
        }
    }

    /// Finishes the drag and resolves the drop target.
    ///
    /// The active marker is always cleared. Returns `None` when no drag was
    /// active, when `raw_task_id` is not the dragged card, or when the drop did
    /// not land on a loaded column.
    pub fn end_drag(
        &mut self,
        cache: &TaskCache,
        raw_task_id: i64,
        raw_target: Option<i64>,
    ) -> Option<ColumnId> {
        let active = self.active.take()?;
        if TaskId::from_raw(raw_task_id) != Some(active.task_id) {
            return None;
        }
        raw_target.and_then(|raw| cache.columns().resolve(raw))
    }

    /// Abandons the drag without a drop.
    pub const fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<TaskId> {
        self.active.map(|active| active.task_id)
    }

    /// Returns the column currently under the pointer, if any. Informational
    /// only; see [`DragTracker::hover`].
    #[must_use]
    pub fn hovered_column(&self) -> Option<ColumnId> {
        self.active.and_then(|active| active.hovered)
    }
}
