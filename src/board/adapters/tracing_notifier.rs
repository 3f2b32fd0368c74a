//! Notifier that reports failures as structured log events.

use crate::board::ports::{FailureNotice, FailureNotifier};

/// Emits each failure notice as a `warn` event on the `taskboard::notify`
/// target, for hosts that forward logs to the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl FailureNotifier for TracingNotifier {
    fn notify_failure(&self, notice: &FailureNotice) {
        tracing::warn!(
            target: "taskboard::notify",
            update_id = %notice.update_id,
            task_id = %notice.task_id,
            restored_status = %notice.restored_status,
            occurred_at = %notice.occurred_at,
            "{}",
            notice.message
        );
    }
}
