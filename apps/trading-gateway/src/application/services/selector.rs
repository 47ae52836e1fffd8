//! Router selection.
//!
//! Orchestrates the configured router set: orders it by priority, asks
//! each router in turn whether it can handle an order, and invokes the
//! first capable one. Stateless and deterministic for a fixed router
//! configuration.

use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::Router;
use crate::domain::order::Order;
use crate::domain::routing::{RoutingDecision, RoutingError};
use crate::observability::{record_routing_decision, record_routing_error};

/// Priority-ordered router set.
///
/// Routers are sorted ascending by [`Router::priority`] once at
/// construction; priority ties keep registration order. The selector
/// never retries and never escalates a capable router's rejection to the
/// next router.
pub struct RouterSelector {
    routers: Vec<Arc<dyn Router>>,
}

impl RouterSelector {
    /// Build a selector over the configured routers.
    #[must_use]
    pub fn new(mut routers: Vec<Arc<dyn Router>>) -> Self {
        // Stable sort keeps registration order for equal priorities.
        routers.sort_by_key(|router| router.priority());
        Self { routers }
    }

    /// Router names in selection order.
    #[must_use]
    pub fn router_names(&self) -> Vec<&str> {
        self.routers.iter().map(|router| router.name()).collect()
    }

    /// Route one order.
    ///
    /// Returns the first capable router's result unchanged, stamped with
    /// the measured processing duration. If no router can handle the
    /// order, returns [`RoutingError::UnsupportedExchange`]; routers that
    /// recognize an exchange but find no live broker return
    /// [`RoutingError::NoBrokerAvailable`] themselves.
    pub async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError> {
        let started = Instant::now();

        for router in &self.routers {
            if !router.can_handle(order) {
                continue;
            }

            tracing::debug!(
                router = router.name(),
                order_id = %order.order_id,
                exchange = %order.exchange,
                "router accepted order"
            );

            return match router.route(order).await {
                Ok(decision) => {
                    let decision = decision.with_processing_time(started.elapsed());
                    tracing::info!(
                        router = %decision.router_name,
                        order_id = %order.order_id,
                        strategy = %decision.strategy,
                        venue = %decision.venue,
                        confidence = decision.confidence,
                        "order routed"
                    );
                    record_routing_decision(&decision);
                    Ok(decision)
                }
                Err(error) => {
                    tracing::warn!(
                        router = router.name(),
                        order_id = %order.order_id,
                        code = error.code(),
                        %error,
                        "routing failed"
                    );
                    record_routing_error(&error);
                    Err(error)
                }
            };
        }

        let error = RoutingError::UnsupportedExchange {
            exchange: order.exchange.clone(),
        };
        tracing::warn!(
            order_id = %order.order_id,
            exchange = %order.exchange,
            "no configured router can handle order"
        );
        record_routing_error(&error);
        Err(error)
    }
}
