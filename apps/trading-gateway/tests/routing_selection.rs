//! Router Selection Integration Tests
//!
//! Exercises the selector against scenario-specific router doubles and
//! against the full configured router set.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use trading_gateway::{
    ExecutionStrategy, GatewayConfig, Order, OrderSide, Router, RouterSelector, RoutingDecision,
    RoutingError, StaticBrokerDirectory, router_set,
};

// =============================================================================
// Scenario Router Double
// =============================================================================

struct ScenarioRouter {
    name: &'static str,
    priority: u32,
    accepts: fn(&Order) -> bool,
    invocations: Arc<Mutex<Vec<String>>>,
}

impl ScenarioRouter {
    fn new(
        name: &'static str,
        priority: u32,
        accepts: fn(&Order) -> bool,
        invocations: &Arc<Mutex<Vec<String>>>,
    ) -> Arc<dyn Router> {
        Arc::new(Self {
            name,
            priority,
            accepts,
            invocations: Arc::clone(invocations),
        })
    }
}

#[async_trait]
impl Router for ScenarioRouter {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn can_handle(&self, order: &Order) -> bool {
        (self.accepts)(order)
    }

    async fn route(&self, _order: &Order) -> Result<RoutingDecision, RoutingError> {
        self.invocations.lock().unwrap().push(self.name.to_string());
        Ok(RoutingDecision::immediate(
            "SCENARIO-BROKER",
            "SCENARIO-VENUE",
            ExecutionStrategy::Immediate,
            "scenario decision",
            self.name,
        ))
    }
}

// =============================================================================
// Scenario: NSE-R / Default-R
// =============================================================================

#[tokio::test]
async fn nse_order_goes_to_nse_router() {
    let invocations = Arc::new(Mutex::new(Vec::new()));
    let selector = RouterSelector::new(vec![
        ScenarioRouter::new("NSE-R", 10, |o| o.exchange == "NSE", &invocations),
        ScenarioRouter::new("Default-R", 20, |_| true, &invocations),
    ]);

    let order = Order::market("ord-1", "RELIANCE", "NSE", OrderSide::Buy, 100);
    let decision = selector.route(&order).await.unwrap();

    assert_eq!(decision.router_name, "NSE-R");
    assert_eq!(*invocations.lock().unwrap(), vec!["NSE-R".to_string()]);
}

#[tokio::test]
async fn bse_order_falls_through_to_default_router() {
    let invocations = Arc::new(Mutex::new(Vec::new()));
    let selector = RouterSelector::new(vec![
        ScenarioRouter::new("NSE-R", 10, |o| o.exchange == "NSE", &invocations),
        ScenarioRouter::new("Default-R", 20, |_| true, &invocations),
    ]);

    let order = Order::market("ord-2", "TCS", "BSE", OrderSide::Buy, 100);
    let decision = selector.route(&order).await.unwrap();

    assert_eq!(decision.router_name, "Default-R");
}

#[tokio::test]
async fn both_declining_is_unsupported_exchange() {
    let invocations = Arc::new(Mutex::new(Vec::new()));
    let selector = RouterSelector::new(vec![
        ScenarioRouter::new("NSE-R", 10, |o| o.exchange == "NSE", &invocations),
        ScenarioRouter::new("Default-R", 20, |o| !o.exchange.is_empty(), &invocations),
    ]);

    let order = Order::market("ord-3", "INFY", "", OrderSide::Buy, 100);
    let error = selector.route(&order).await.unwrap_err();

    assert_eq!(
        error,
        RoutingError::UnsupportedExchange {
            exchange: String::new()
        }
    );
    assert_eq!(error.code(), "UNSUPPORTED_EXCHANGE");
    // Neither router was invoked.
    assert!(invocations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn selection_order_follows_priority_not_registration() {
    let invocations = Arc::new(Mutex::new(Vec::new()));
    let selector = RouterSelector::new(vec![
        ScenarioRouter::new("registered-first", 90, |_| true, &invocations),
        ScenarioRouter::new("registered-second", 5, |_| true, &invocations),
    ]);

    assert_eq!(
        selector.router_names(),
        vec!["registered-second", "registered-first"]
    );

    let order = Order::market("ord-4", "AAPL", "NYSE", OrderSide::Buy, 100);
    let decision = selector.route(&order).await.unwrap();
    assert_eq!(decision.router_name, "registered-second");
}

// =============================================================================
// Full Configured Router Set
// =============================================================================

fn configured_selector() -> (RouterSelector, Arc<StaticBrokerDirectory>) {
    let config = GatewayConfig::default();
    let directory = Arc::new(
        StaticBrokerDirectory::new()
            .with_binding("NYSE", "ALPACA", "XNYS")
            .with_binding("NASDAQ", "ALPACA", "XNAS"),
    );
    let selector = RouterSelector::new(router_set(&config.routing, directory.clone()));
    (selector, directory)
}

#[tokio::test]
async fn small_market_order_routes_direct_and_immediate() {
    let (selector, _) = configured_selector();
    let order = Order::market("ord-10", "AAPL", "NYSE", OrderSide::Buy, 500);

    let decision = selector.route(&order).await.unwrap();
    assert_eq!(decision.router_name, "nyse-direct");
    assert_eq!(decision.strategy, ExecutionStrategy::Immediate);
    assert!(decision.immediate_execution);
    assert!((decision.confidence - 1.0).abs() < f64::EPSILON);
    assert_eq!(decision.venue, "XNYS");
}

#[tokio::test]
async fn mid_size_order_is_worked_algorithmically() {
    let (selector, _) = configured_selector();
    let order = Order::market("ord-11", "MSFT", "NASDAQ", OrderSide::Sell, 50_000);

    let decision = selector.route(&order).await.unwrap();
    assert_eq!(decision.router_name, "algo-slicer");
    assert_eq!(decision.strategy, ExecutionStrategy::Vwap);
    assert!(decision.strategy.is_algorithmic());
}

#[tokio::test]
async fn block_limit_order_crosses_in_the_dark_pool() {
    let (selector, _) = configured_selector();
    let order = Order::limit("ord-12", "AAPL", "NYSE", OrderSide::Sell, 400_000, dec!(189.50));

    let decision = selector.route(&order).await.unwrap();
    assert_eq!(decision.router_name, "dark-pool");
    assert_eq!(decision.strategy, ExecutionStrategy::DarkPool);
    assert!(decision.strategy.is_suitable_for_large_orders());
}

#[tokio::test]
async fn oversized_market_order_is_too_large() {
    let (selector, _) = configured_selector();
    let order = Order::market("ord-13", "AAPL", "NYSE", OrderSide::Buy, 2_000_000);

    let error = selector.route(&order).await.unwrap_err();
    assert_eq!(
        error,
        RoutingError::OrderTooLarge {
            quantity: 2_000_000,
            max_quantity: 1_000_000
        }
    );
}

#[tokio::test]
async fn unmapped_exchange_gets_smart_rejection_not_escalation() {
    let (selector, _) = configured_selector();
    let order = Order::market("ord-14", "VOD", "LSE", OrderSide::Buy, 100);

    // The smart router is capable (non-blank exchange) and rejects; the
    // rejection is the terminal outcome, not an error.
    let decision = selector.route(&order).await.unwrap();
    assert!(decision.is_rejection());
    assert_eq!(decision.router_name, "smart-router");
    assert!(decision.confidence.abs() < f64::EPSILON);
    assert!(!decision.immediate_execution);
}

#[tokio::test]
async fn offline_broker_fails_with_connectivity_error() {
    let (selector, directory) = configured_selector();
    directory.mark_offline("ALPACA");

    let order = Order::market("ord-15", "AAPL", "NYSE", OrderSide::Buy, 500);
    let error = selector.route(&order).await.unwrap_err();
    assert_eq!(
        error,
        RoutingError::BrokerConnectivity {
            broker_name: "ALPACA".to_string()
        }
    );

    directory.mark_online("ALPACA");
    let decision = selector.route(&order).await.unwrap();
    assert_eq!(decision.router_name, "nyse-direct");
}

#[tokio::test]
async fn blank_exchange_is_unsupported_by_the_full_set() {
    let (selector, _) = configured_selector();
    let order = Order::market("ord-16", "AAPL", "", OrderSide::Buy, 500);

    let error = selector.route(&order).await.unwrap_err();
    assert_eq!(error.code(), "UNSUPPORTED_EXCHANGE");
}
