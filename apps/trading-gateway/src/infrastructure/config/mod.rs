//! Configuration Module
//!
//! Configuration loading for the gateway core.

mod settings;

pub use settings::{ConfigError, GatewayConfig, RoutingSettings, SessionSettings};
