//! Smart order router (catch-all).

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::application::ports::{BrokerConnections, Router};
use crate::domain::order::{Order, OrderType};
use crate::domain::routing::{ExecutionStrategy, RoutingDecision, RoutingError};

/// Last-resort router for any order with a usable exchange hint.
///
/// Orders on exchanges with no directory mapping are rejected rather
/// than passed on; a rejection from a capable router is terminal.
pub struct SmartRouter {
    priority: u32,
    working_delay: chrono::Duration,
    directory: Arc<dyn BrokerConnections>,
}

impl SmartRouter {
    /// Router name used for attribution.
    pub const NAME: &'static str = "smart-router";

    /// Create the catch-all router.
    #[must_use]
    pub fn new(
        priority: u32,
        working_delay: chrono::Duration,
        directory: Arc<dyn BrokerConnections>,
    ) -> Self {
        Self {
            priority,
            working_delay,
            directory,
        }
    }
}

#[async_trait]
impl Router for SmartRouter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_handle(&self, order: &Order) -> bool {
        !order.exchange.trim().is_empty()
    }

    async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError> {
        let Some(binding) = self.directory.venue_for(&order.exchange).await else {
            return Ok(RoutingDecision::reject(
                format!("no venue mapping for exchange '{}'", order.exchange),
                Self::NAME,
            ));
        };

        if !self.directory.is_connected(&binding.broker_id).await {
            return Err(RoutingError::BrokerConnectivity {
                broker_name: binding.broker_id,
            });
        }

        let decision = match order.order_type {
            OrderType::Market => RoutingDecision::immediate(
                binding.broker_id,
                binding.venue,
                ExecutionStrategy::Immediate,
                "smart-routed market order".to_string(),
                Self::NAME,
            ),
            OrderType::Limit => RoutingDecision::delayed(
                binding.broker_id,
                binding.venue,
                ExecutionStrategy::Smart,
                Utc::now() + self.working_delay,
                0.8,
                "smart-routed limit order worked across venues".to_string(),
                Self::NAME,
            ),
        };
        Ok(decision)
    }
}
