//! Adapter implementations of the board ports.

pub mod http;
pub mod memory;
pub mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
