//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifier;
pub mod remote;

pub use notifier::{FailureNotice, FailureNotifier};
pub use remote::{RemoteStoreError, RemoteStoreResult, RemoteTaskStore};

#[cfg(test)]
pub use remote::MockRemoteTaskStore;
