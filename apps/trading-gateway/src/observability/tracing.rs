//! Tracing subscriber initialization.
//!
//! Structured console logging with `RUST_LOG`-style filtering. Hosts
//! that want OTLP export install their own subscriber instead of
//! calling these.

use tracing_subscriber::EnvFilter;

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .init();
}

/// Initialize the global tracing subscriber, tolerating an existing one.
///
/// Returns whether this call installed the subscriber. Handy in tests
/// where multiple cases race to initialize.
pub fn try_init_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}
