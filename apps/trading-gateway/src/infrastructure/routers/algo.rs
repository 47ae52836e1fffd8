//! Algorithmic large-order router.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::application::ports::{BrokerConnections, Router};
use crate::domain::order::{Order, OrderType};
use crate::domain::routing::{ExecutionStrategy, RoutingDecision, RoutingError};

/// Works large orders over time with a slicing algorithm.
///
/// Orders at or above the iceberg threshold hide their size; below it,
/// market orders participate with volume (VWAP) and limit orders spread
/// over the window (TWAP). The router declares a hard maximum and
/// reports [`RoutingError::OrderTooLarge`] above it.
pub struct AlgoRouter {
    min_quantity: u64,
    max_quantity: u64,
    iceberg_threshold: u64,
    slice_window: chrono::Duration,
    priority: u32,
    directory: Arc<dyn BrokerConnections>,
}

impl AlgoRouter {
    /// Router name used for attribution.
    pub const NAME: &'static str = "algo-slicer";

    /// Create an algorithmic router.
    #[must_use]
    pub fn new(
        min_quantity: u64,
        max_quantity: u64,
        iceberg_threshold: u64,
        slice_window: chrono::Duration,
        priority: u32,
        directory: Arc<dyn BrokerConnections>,
    ) -> Self {
        Self {
            min_quantity,
            max_quantity,
            iceberg_threshold,
            slice_window,
            priority,
            directory,
        }
    }

    const fn pick_strategy(&self, order: &Order) -> ExecutionStrategy {
        if order.quantity >= self.iceberg_threshold {
            ExecutionStrategy::Iceberg
        } else {
            match order.order_type {
                OrderType::Market => ExecutionStrategy::Vwap,
                OrderType::Limit => ExecutionStrategy::Twap,
            }
        }
    }
}

#[async_trait]
impl Router for AlgoRouter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_handle(&self, order: &Order) -> bool {
        order.quantity >= self.min_quantity && !order.exchange.is_empty()
    }

    async fn route(&self, order: &Order) -> Result<RoutingDecision, RoutingError> {
        if self.min_quantity > self.max_quantity {
            return Err(RoutingError::Configuration {
                config_key: "routing.algo_max_quantity".to_string(),
            });
        }

        if order.quantity > self.max_quantity {
            return Err(RoutingError::OrderTooLarge {
                quantity: order.quantity,
                max_quantity: self.max_quantity,
            });
        }

        let Some(binding) = self.directory.venue_for(&order.exchange).await else {
            return Err(RoutingError::NoBrokerAvailable {
                exchange: order.exchange.clone(),
                reason: "no broker mapped to exchange".to_string(),
            });
        };

        if !self.directory.is_connected(&binding.broker_id).await {
            return Err(RoutingError::BrokerConnectivity {
                broker_name: binding.broker_id,
            });
        }

        let strategy = self.pick_strategy(order);
        debug_assert!(strategy.is_suitable_for_large_orders());

        Ok(RoutingDecision::delayed(
            binding.broker_id,
            binding.venue,
            strategy,
            Utc::now() + self.slice_window,
            0.85,
            format!(
                "{} shares worked as {} over {}s window",
                order.quantity,
                strategy,
                self.slice_window.num_seconds()
            ),
            Self::NAME,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::order::OrderSide;
    use crate::infrastructure::brokers::StaticBrokerDirectory;

    fn directory() -> Arc<StaticBrokerDirectory> {
        Arc::new(StaticBrokerDirectory::new().with_binding("NYSE", "ALPACA", "XNYS"))
    }

    fn router() -> AlgoRouter {
        AlgoRouter::new(
            10_000,
            1_000_000,
            100_000,
            chrono::Duration::seconds(900),
            30,
            directory(),
        )
    }

    #[test]
    fn handles_orders_at_or_above_minimum() {
        let router = router();
        assert!(router.can_handle(&Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 10_000)));
        assert!(!router.can_handle(&Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 9_999)));
        assert!(!router.can_handle(&Order::market("o", "AAPL", "", OrderSide::Buy, 50_000)));
    }

    #[tokio::test]
    async fn over_maximum_is_order_too_large() {
        let router = router();
        let order = Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 2_000_000);

        let error = router.route(&order).await.unwrap_err();
        assert_eq!(
            error,
            RoutingError::OrderTooLarge {
                quantity: 2_000_000,
                max_quantity: 1_000_000
            }
        );
    }

    #[tokio::test]
    async fn market_order_below_iceberg_threshold_is_vwap() {
        let router = router();
        let order = Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 50_000);

        let decision = router.route(&order).await.unwrap();
        assert_eq!(decision.strategy, ExecutionStrategy::Vwap);
        assert!(decision.strategy.is_algorithmic());
        assert!(!decision.immediate_execution);
    }

    #[tokio::test]
    async fn limit_order_below_iceberg_threshold_is_twap() {
        let router = router();
        let order = Order::limit("o", "AAPL", "NYSE", OrderSide::Sell, 50_000, dec!(190));

        let decision = router.route(&order).await.unwrap();
        assert_eq!(decision.strategy, ExecutionStrategy::Twap);
    }

    #[tokio::test]
    async fn at_iceberg_threshold_hides_size() {
        let router = router();
        let order = Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 100_000);

        let decision = router.route(&order).await.unwrap();
        assert_eq!(decision.strategy, ExecutionStrategy::Iceberg);
    }

    #[tokio::test]
    async fn unknown_exchange_is_no_broker_available() {
        let router = router();
        let order = Order::market("o", "AAPL", "LSE", OrderSide::Buy, 50_000);

        let error = router.route(&order).await.unwrap_err();
        assert_eq!(error.code(), "NO_BROKER_AVAILABLE");
    }

    #[tokio::test]
    async fn inverted_bounds_are_a_configuration_error() {
        let router = AlgoRouter::new(
            1_000_000,
            10_000,
            100_000,
            chrono::Duration::seconds(900),
            30,
            directory(),
        );
        let order = Order::market("o", "AAPL", "NYSE", OrderSide::Buy, 2_000_000);

        let error = router.route(&order).await.unwrap_err();
        assert_eq!(error.code(), "CONFIGURATION_ERROR");
    }
}
