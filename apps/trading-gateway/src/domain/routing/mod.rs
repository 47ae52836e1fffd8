//! Order Routing Types
//!
//! Domain types for the routing decision layer: the strategy catalog,
//! the immutable routing decision, and the closed error taxonomy.

mod decision;
mod error;
mod strategy;

pub use decision::RoutingDecision;
pub use error::RoutingError;
pub use strategy::ExecutionStrategy;
