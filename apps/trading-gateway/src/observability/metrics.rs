//! Prometheus Metrics Module
//!
//! Exposes gateway metrics via Prometheus format for monitoring.
//!
//! # Metrics Categories
//!
//! - **Routing**: Decisions by router/strategy, errors by stable code
//! - **Delivery**: Per-session sends and failures during fan-out
//! - **Sessions**: Active session and subscription gauges

use std::sync::OnceLock;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::domain::routing::{RoutingDecision, RoutingError};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// # Panics
///
/// Panics if the recorder cannot be installed.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            register_metrics();
            handle
        })
        .clone()
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

fn register_metrics() {
    describe_counter!(
        "gateway_orders_routed_total",
        "Total routing decisions by router and strategy"
    );
    describe_counter!(
        "gateway_routing_errors_total",
        "Total routing failures by stable error code"
    );
    describe_counter!(
        "gateway_events_delivered_total",
        "Total per-session market data sends"
    );
    describe_counter!(
        "gateway_deliveries_failed_total",
        "Total per-session delivery failures"
    );
    describe_gauge!("gateway_active_sessions", "Registered client sessions");
    describe_gauge!(
        "gateway_active_subscriptions",
        "Total symbol subscriptions across all sessions"
    );
}

/// Record a successful routing decision.
pub fn record_routing_decision(decision: &RoutingDecision) {
    counter!(
        "gateway_orders_routed_total",
        "router" => decision.router_name.clone(),
        "strategy" => decision.strategy.to_string()
    )
    .increment(1);
}

/// Record a routing failure by its stable code.
pub fn record_routing_error(error: &RoutingError) {
    counter!(
        "gateway_routing_errors_total",
        "code" => error.code()
    )
    .increment(1);
}

/// Record the outcome of one fan-out.
pub fn record_delivery(delivered: u64, failed: u64) {
    if delivered > 0 {
        counter!("gateway_events_delivered_total").increment(delivered);
    }
    if failed > 0 {
        counter!("gateway_deliveries_failed_total").increment(failed);
    }
}

/// Update the session/subscription gauges.
#[allow(clippy::cast_precision_loss)]
pub fn set_session_gauges(sessions: usize, subscriptions: usize) {
    gauge!("gateway_active_sessions").set(sessions as f64);
    gauge!("gateway_active_subscriptions").set(subscriptions as f64);
}
