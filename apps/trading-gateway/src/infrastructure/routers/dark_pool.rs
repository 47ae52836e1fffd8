//! Dark pool block router.

use async_trait::async_trait;
use chrono::Utc;

use crate::application::ports::Router;
use crate::domain::order::{Order, OrderType};
use crate::domain::routing::{ExecutionStrategy, RoutingDecision, RoutingError};

/// Routes block-size limit orders to a dark pool.
///
/// Only limit orders qualify: the crossing price comes from the order
/// itself. Market blocks fall through to the algorithmic router.
pub struct DarkPoolRouter {
    broker_id: String,
    venue: String,
    min_quantity: u64,
    execution_delay: chrono::Duration,
    priority: u32,
}

impl DarkPoolRouter {
    /// Router name used for attribution.
    pub const NAME: &'static str = "dark-pool";

    /// Create a dark pool router.
    #[must_use]
    pub fn new(
        broker_id: impl Into<String>,
        venue: impl Into<String>,
        min_quantity: u64,
        execution_delay: chrono::Duration,
        priority: u32,
    ) -> Self {
        Self {
            broker_id: broker_id.into(),
            venue: venue.into(),
            min_quantity,
            execution_delay,
            priority,
        }
    }
}

#[async_trait]
impl Router for DarkPoolRouter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_handle(&self, order: &Order) -> bool {
        order.quantity >= self.min_quantity && order.order_type == OrderType::Limit
    }

    async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError> {
        if self.broker_id.is_empty() || self.venue.is_empty() {
            return Err(RoutingError::Configuration {
                config_key: "routing.dark_pool_broker".to_string(),
            });
        }

        Ok(RoutingDecision::delayed(
            self.broker_id.clone(),
            self.venue.clone(),
            ExecutionStrategy::DarkPool,
            Utc::now() + self.execution_delay,
            0.75,
            format!(
                "block of {} shares crossed in dark pool to limit market impact",
                order.quantity
            ),
            Self::NAME,
        ))
    }
}
