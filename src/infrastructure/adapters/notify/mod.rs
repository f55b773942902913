//! Notifier Adapters

mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
