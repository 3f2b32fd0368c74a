//! Notifier that keeps every notice for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use crate::board::ports::{FailureNotice, FailureNotifier};

/// Collects failure notices in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<FailureNotice>>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all notices received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<FailureNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of notices received so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FailureNotifier for RecordingNotifier {
    fn notify_failure(&self, notice: &FailureNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
