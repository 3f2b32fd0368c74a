//! Application services for board orchestration.

mod cache;
mod loader;
mod reconciler;
mod session;

pub use cache::BoardCache;
pub use loader::{BoardLoadError, BoardLoadReport, BoardLoadResult, BoardLoader};
pub use reconciler::{BoardReconciler, DropOutcome, DropResolution, IgnoredDrop, PendingUpdate};
pub use session::BoardSession;
