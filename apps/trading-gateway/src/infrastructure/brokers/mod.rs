//! Broker Directory Adapters
//!
//! In-memory implementation of the [`BrokerConnections`] port. Bindings
//! are loaded at startup; connectivity flags are flipped by the broker
//! adapters' heartbeat loops, which live outside this core.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{BrokerConnections, VenueBinding};

/// Static exchange-to-broker directory with mutable connectivity flags.
///
/// Brokers are considered connected unless explicitly marked offline.
#[derive(Debug, Default)]
pub struct StaticBrokerDirectory {
    bindings: HashMap<String, VenueBinding>,
    offline: RwLock<HashSet<String>>,
}

impl StaticBrokerDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding for an exchange. Exchange lookup is case-insensitive.
    #[must_use]
    pub fn with_binding(
        mut self,
        exchange: impl Into<String>,
        broker_id: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        self.bindings.insert(
            exchange.into().to_uppercase(),
            VenueBinding::new(broker_id, venue),
        );
        self
    }

    /// Mark a broker's connection as down.
    pub fn mark_offline(&self, broker_id: &str) {
        self.offline.write().insert(broker_id.to_string());
        tracing::warn!(broker_id, "broker marked offline");
    }

    /// Mark a broker's connection as live again.
    pub fn mark_online(&self, broker_id: &str) {
        if self.offline.write().remove(broker_id) {
            tracing::info!(broker_id, "broker back online");
        }
    }
}

#[async_trait]
impl BrokerConnections for StaticBrokerDirectory {
    async fn venue_for(&self, exchange: &str) -> Option<VenueBinding> {
        self.bindings.get(&exchange.to_uppercase()).cloned()
    }

    async fn is_connected(&self, broker_id: &str) -> bool {
        !self.offline.read().contains(broker_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticBrokerDirectory {
        StaticBrokerDirectory::new()
            .with_binding("NYSE", "ALPACA", "XNYS")
            .with_binding("NASDAQ", "ALPACA", "XNAS")
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let directory = directory();
        let binding = directory.venue_for("nyse").await.unwrap();
        assert_eq!(binding.broker_id, "ALPACA");
        assert_eq!(binding.venue, "XNYS");
    }

    #[tokio::test]
    async fn unknown_exchange_has_no_binding() {
        let directory = directory();
        assert!(directory.venue_for("LSE").await.is_none());
    }

    #[tokio::test]
    async fn connectivity_flags_toggle() {
        let directory = directory();
        assert!(directory.is_connected("ALPACA").await);

        directory.mark_offline("ALPACA");
        assert!(!directory.is_connected("ALPACA").await);

        directory.mark_online("ALPACA");
        assert!(directory.is_connected("ALPACA").await);
    }
}
