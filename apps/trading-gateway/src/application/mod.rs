//! Application layer.
//!
//! Use cases and port definitions following the Hexagonal Architecture
//! pattern.

/// Port interfaces for external systems.
pub mod ports;

/// Orchestration services.
pub mod services;
