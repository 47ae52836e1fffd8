//! Direct exchange router.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::application::ports::{BrokerConnections, Router};
use crate::domain::order::{Order, OrderType};
use crate::domain::routing::{ExecutionStrategy, RoutingDecision, RoutingError};

/// Routes ordinary-sized orders straight to one configured exchange.
///
/// Market orders execute immediately; limit orders are scheduled after a
/// short working delay. Orders above the direct-size cap are declined so
/// the block-order routers get them.
pub struct ExchangeRouter {
    exchange: String,
    name: String,
    priority: u32,
    max_direct_quantity: u64,
    scheduled_delay: chrono::Duration,
    directory: Arc<dyn BrokerConnections>,
}

impl ExchangeRouter {
    /// Create a direct router for `exchange`.
    #[must_use]
    pub fn new(
        exchange: impl Into<String>,
        priority: u32,
        max_direct_quantity: u64,
        scheduled_delay: chrono::Duration,
        directory: Arc<dyn BrokerConnections>,
    ) -> Self {
        let exchange = exchange.into();
        let name = format!("{}-direct", exchange.to_lowercase());
        Self {
            exchange,
            name,
            priority,
            max_direct_quantity,
            scheduled_delay,
            directory,
        }
    }
}

#[async_trait]
impl Router for ExchangeRouter {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_handle(&self, order: &Order) -> bool {
        order.exchange.eq_ignore_ascii_case(&self.exchange)
            && order.quantity <= self.max_direct_quantity
    }

    async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError> {
        if self.exchange.is_empty() {
            return Err(RoutingError::Configuration {
                config_key: "routing.direct_exchanges".to_string(),
            });
        }

        let Some(binding) = self.directory.venue_for(&self.exchange).await else {
            return Err(RoutingError::NoBrokerAvailable {
                exchange: self.exchange.clone(),
                reason: "no broker mapped to exchange".to_string(),
            });
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
                format!("market order routed directly to {}", self.exchange),
                self.name.clone(),
            ),
            OrderType::Limit => RoutingDecision::delayed(
                binding.broker_id,
                binding.venue,
                ExecutionStrategy::Scheduled,
                Utc::now() + self.scheduled_delay,
                0.9,
                format!("limit order scheduled on {}", self.exchange),
                self.name.clone(),
            ),
        };
        Ok(decision)
    }
}
