//! Router Port (Driver Port)
//!
//! The polymorphic routing capability. Concrete routers are independent
//! types registered into an ordered set at startup; the set and the
//! predicates are configuration, not hardcoded in the core.

use async_trait::async_trait;

use crate::domain::order::Order;
use crate::domain::routing::{RoutingDecision, RoutingError};

/// A candidate router for incoming orders.
#[async_trait]
pub trait Router: Send + Sync {
    /// Stable, unique name used for attribution and logs.
    fn name(&self) -> &str;

    /// Selection priority. Lower values are tried first; ties keep
    /// registration order.
    fn priority(&self) -> u32;

    /// Whether this router can route the order.
    ///
    /// Must be a fast, side-effect-free predicate: it is evaluated for
    /// every order against every configured router.
    fn can_handle(&self, order: &Order) -> bool;

    /// Route the order.
    ///
    /// Only called after `can_handle` returned true. May have side
    /// effects such as probing live broker connectivity.
    async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError>;
}
