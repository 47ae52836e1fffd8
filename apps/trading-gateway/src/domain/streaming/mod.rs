//! Market Data Streaming Types
//!
//! Core domain types for inbound market data events. These are the
//! canonical internal representation fanned out to sessions; transport
//! framing is a collaborator concern.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market data type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketDataType {
    /// Top-of-book quote updates.
    Quotes,
    /// Executed trade prints.
    Trades,
    /// Aggregated OHLCV bars.
    Bars,
}

impl MarketDataType {
    /// Get all data types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Quotes, Self::Trades, Self::Bars]
    }
}

/// One inbound market data event for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataEvent {
    /// Symbol the event is for.
    pub symbol: String,
    /// Data type of the event.
    pub kind: MarketDataType,
    /// Price carried by the event.
    pub price: Decimal,
    /// Size (shares/contracts) carried by the event.
    pub size: u64,
    /// Event timestamp from the upstream feed.
    pub timestamp: DateTime<Utc>,
}

impl MarketDataEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        kind: MarketDataType,
        price: Decimal,
        size: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            price,
            size,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn all_data_types_listed() {
        let all = MarketDataType::all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&MarketDataType::Quotes));
        assert!(all.contains(&MarketDataType::Trades));
        assert!(all.contains(&MarketDataType::Bars));
    }

    #[test]
    fn event_serde_round_trip() {
        let event = MarketDataEvent::new("AAPL", MarketDataType::Trades, dec!(189.22), 300);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: MarketDataEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn data_type_serde_tokens() {
        assert_eq!(
            serde_json::to_string(&MarketDataType::Quotes).unwrap(),
            "\"QUOTES\""
        );
        let parsed: MarketDataType = serde_json::from_str("\"BARS\"").unwrap();
        assert_eq!(parsed, MarketDataType::Bars);
    }
}
