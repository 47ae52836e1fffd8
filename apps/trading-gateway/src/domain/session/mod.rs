//! Session & Subscription Types
//!
//! Domain types for client sessions and their subscription requests.
//! Session identifiers are opaque strings generated by the transport
//! layer; this core never invents them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::streaming::MarketDataType;

/// Unique identifier for a client session.
pub type SessionId = String;

/// A symbol string (stock ticker or OCC option symbol).
pub type Symbol = String;

/// Requested subscription operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionAction {
    /// Add symbols to the session's subscription set.
    Subscribe,
    /// Remove symbols from the session's subscription set.
    Unsubscribe,
}

/// Inbound subscription request for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Operation to apply.
    pub action: SubscriptionAction,
    /// Symbols to act on.
    pub symbols: Vec<Symbol>,
    /// Data types the session wants. Empty means all types.
    #[serde(default)]
    pub data_types: Vec<MarketDataType>,
}

impl SubscriptionRequest {
    /// Create a subscribe request.
    #[must_use]
    pub fn subscribe(
        symbols: impl IntoIterator<Item = Symbol>,
        data_types: impl IntoIterator<Item = MarketDataType>,
    ) -> Self {
        Self {
            action: SubscriptionAction::Subscribe,
            symbols: symbols.into_iter().collect(),
            data_types: data_types.into_iter().collect(),
        }
    }

    /// Create an unsubscribe request.
    #[must_use]
    pub fn unsubscribe(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            action: SubscriptionAction::Unsubscribe,
            symbols: symbols.into_iter().collect(),
            data_types: Vec::new(),
        }
    }
}

/// Confirmation returned for a handled subscription request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionAck {
    /// Whether the request was applied.
    pub success: bool,
    /// Symbols the request acted upon.
    pub symbols: Vec<Symbol>,
    /// Human-readable summary.
    pub message: String,
    /// Session's total active subscriptions after the request.
    pub active_subscriptions: usize,
}

/// Payload sent to a client when its session is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWelcome {
    /// The session's identifier, echoed back.
    pub session_id: SessionId,
    /// Maximum symbols one session may subscribe to.
    pub max_subscriptions: usize,
    /// Greeting for the client.
    pub message: String,
}

/// Typed failure of a single subscription request.
///
/// Failures reject the one request and leave the session's existing
/// subscriptions untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// The session is not registered.
    #[error("session '{session_id}' is not registered")]
    UnknownSession {
        /// Session the request named.
        session_id: SessionId,
    },

    /// Applying the request would exceed the per-session limit.
    #[error("subscription count {requested} would exceed limit {limit}")]
    CapacityExceeded {
        /// Subscription count the request would result in.
        requested: usize,
        /// Configured per-session limit.
        limit: usize,
    },

    /// The request named no symbols.
    #[error("subscription request contains no symbols")]
    EmptySymbolSet,
}

impl SubscriptionError {
    /// Stable error code for metrics and logging.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownSession { .. } => "UNKNOWN_SESSION",
            Self::CapacityExceeded { .. } => "SUBSCRIPTION_LIMIT_EXCEEDED",
            Self::EmptySymbolSet => "EMPTY_SYMBOL_SET",
        }
    }
}
