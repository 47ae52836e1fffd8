//! Infrastructure layer.
//!
//! Adapters behind the application ports: broker directory, concrete
//! routers, session sinks, the delivery path, and configuration.

/// Broker directory adapters.
pub mod brokers;

/// Configuration loading.
pub mod config;

/// Market data fan-out.
pub mod delivery;

/// Concrete router implementations.
pub mod routers;

/// Session sink adapters.
pub mod sinks;
