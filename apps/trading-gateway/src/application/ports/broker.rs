//! Broker Directory Port (Driven Port)
//!
//! Lookup of broker/venue bindings per exchange and live connectivity
//! probing. Routers consult this port while routing; the network-facing
//! implementation lives with the broker adapters.

use async_trait::async_trait;

/// Broker and venue an exchange's flow is routed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueBinding {
    /// Broker identifier.
    pub broker_id: String,
    /// Execution venue identifier.
    pub venue: String,
}

impl VenueBinding {
    /// Create a binding.
    #[must_use]
    pub fn new(broker_id: impl Into<String>, venue: impl Into<String>) -> Self {
        Self {
            broker_id: broker_id.into(),
            venue: venue.into(),
        }
    }
}

/// Directory of broker connections keyed by exchange.
#[async_trait]
pub trait BrokerConnections: Send + Sync {
    /// Broker/venue binding for an exchange, if one is configured.
    async fn venue_for(&self, exchange: &str) -> Option<VenueBinding>;

    /// Whether the broker's connection is currently live.
    async fn is_connected(&self, broker_id: &str) -> bool;
}
