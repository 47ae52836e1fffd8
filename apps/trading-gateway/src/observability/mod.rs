//! Observability module for metrics and logging.
//!
//! Provides instrumentation for the gateway: Prometheus metrics export
//! and tracing subscriber setup.

mod metrics;
mod tracing;

pub use metrics::{
    get_metrics_handle, init_metrics, record_delivery, record_routing_decision,
    record_routing_error, set_session_gauges,
};
pub use tracing::{init_tracing, try_init_tracing};
