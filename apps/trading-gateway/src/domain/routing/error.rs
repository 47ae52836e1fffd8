//! Routing error taxonomy.
//!
//! Closed set of failure reasons for a routing attempt. Every variant
//! carries a stable code string used as a metrics label and in logs;
//! codes are release contracts and must never change.

use thiserror::Error;

/// Typed failure of a single routing attempt.
///
/// Exactly one variant is produced per failed attempt. All variants are
/// terminal for that attempt; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The exchange is known but no broker is currently available for it.
    #[error("no broker available for exchange '{exchange}': {reason}")]
    NoBrokerAvailable {
        /// Exchange the order targeted.
        exchange: String,
        /// Why no broker could be used.
        reason: String,
    },

    /// No configured router recognizes the order's exchange.
    #[error("unsupported exchange: '{exchange}'")]
    UnsupportedExchange {
        /// Exchange the order targeted.
        exchange: String,
    },

    /// The order quantity exceeds the router's declared maximum.
    #[error("order quantity {quantity} exceeds maximum {max_quantity}")]
    OrderTooLarge {
        /// Requested quantity.
        quantity: u64,
        /// Maximum the router accepts.
        max_quantity: u64,
    },

    /// The selected broker is unreachable at routing time.
    #[error("broker '{broker_name}' is not reachable")]
    BrokerConnectivity {
        /// Broker that failed the connectivity probe.
        broker_name: String,
    },

    /// A router was invoked with invalid configuration.
    #[error("invalid routing configuration: {config_key}")]
    Configuration {
        /// Configuration key that is missing or inconsistent.
        config_key: String,
    },
}

impl RoutingError {
    /// Stable error code for metrics and logging.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoBrokerAvailable { .. } => "NO_BROKER_AVAILABLE",
            Self::UnsupportedExchange { .. } => "UNSUPPORTED_EXCHANGE",
            Self::OrderTooLarge { .. } => "ORDER_TOO_LARGE",
            Self::BrokerConnectivity { .. } => "BROKER_CONNECTIVITY",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}
