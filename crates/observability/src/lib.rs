//! Tracing setup shared by tests, benches and embedding applications.

/// Subscriber configuration (filters, output format).
pub mod subscriber;

pub use subscriber::{LogFormat, SubscriberConfig};

/// Initialize process-wide tracing from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(&SubscriberConfig::from_env());
}
