//! In-memory adapters for tests and offline use.

mod notifier;
mod store;

pub use notifier::RecordingNotifier;
pub use store::{InMemoryTaskStore, StatusUpdateCall};
