//! Order Value Objects
//!
//! The inbound order shape consumed by the routing layer. Orders are
//! supplied by collaborators (API layer, OMS); this core never mutates
//! or persists them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type specifying execution behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order - execute at best available price.
    Market,
    /// Limit order - execute at specified price or better.
    Limit,
}

impl OrderType {
    /// Returns true if this order type requires a limit price.
    #[must_use]
    pub const fn requires_limit_price(&self) -> bool {
        matches!(self, Self::Limit)
    }

    /// Returns true if this is a market order (immediate execution).
    #[must_use]
    pub const fn is_market(&self) -> bool {
        matches!(self, Self::Market)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
        }
    }
}

/// An order presented to the routing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Client order ID.
    pub order_id: String,
    /// Symbol to trade.
    pub symbol: String,
    /// Exchange hint for routing.
    pub exchange: String,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity in whole units.
    pub quantity: u64,
    /// Limit price (for limit orders).
    pub limit_price: Option<Decimal>,
}

impl Order {
    /// Create a market order.
    #[must_use]
    pub fn market(
        order_id: impl Into<String>,
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        side: OrderSide,
        quantity: u64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            symbol: symbol.into(),
            exchange: exchange.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            limit_price: None,
        }
    }

    /// Create a limit order.
    #[must_use]
    pub fn limit(
        order_id: impl Into<String>,
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        side: OrderSide,
        quantity: u64,
        limit_price: Decimal,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            symbol: symbol.into(),
            exchange: exchange.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            limit_price: Some(limit_price),
        }
    }
}
