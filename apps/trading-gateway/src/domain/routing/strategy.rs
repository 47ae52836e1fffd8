//! Execution strategy catalog.
//!
//! Closed enumeration of the strategies an order can be routed with.
//! Routers pick a strategy; downstream execution interprets it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution strategy assigned to a routed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStrategy {
    /// Execute immediately at the best available venue.
    Immediate,
    /// Execute at a scheduled future time.
    Scheduled,
    /// Break the order into smaller child orders.
    Sliced,
    /// Show only a small visible portion of the order at a time.
    Iceberg,
    /// Participate proportionally to market volume (volume-weighted).
    Vwap,
    /// Distribute the order evenly across a time window (time-weighted).
    Twap,
    /// Route to a dark pool for minimal market impact.
    DarkPool,
    /// Let the smart order router pick the venue dynamically.
    Smart,
    /// Do not execute; the order is rejected.
    Reject,
}

impl ExecutionStrategy {
    /// Fixed human-readable description of the strategy.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Immediate => "Immediate execution at best available venue",
            Self::Scheduled => "Execution deferred to a scheduled time",
            Self::Sliced => "Order sliced into smaller child orders",
            Self::Iceberg => "Order executed with hidden quantity",
            Self::Vwap => "Volume-weighted average price execution",
            Self::Twap => "Time-weighted average price execution",
            Self::DarkPool => "Execution via dark pool venue",
            Self::Smart => "Smart order routing across venues",
            Self::Reject => "Order rejected, no execution",
        }
    }

    /// Returns true if the strategy executes without delay.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate)
    }

    /// Returns true if the strategy is algorithmic (works the order over time).
    #[must_use]
    pub const fn is_algorithmic(&self) -> bool {
        matches!(self, Self::Vwap | Self::Twap | Self::Iceberg | Self::Sliced)
    }

    /// Returns true if the strategy is suitable for large orders.
    #[must_use]
    pub const fn is_suitable_for_large_orders(&self) -> bool {
        matches!(
            self,
            Self::Sliced | Self::Iceberg | Self::Vwap | Self::Twap | Self::DarkPool
        )
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "IMMEDIATE"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Sliced => write!(f, "SLICED"),
            Self::Iceberg => write!(f, "ICEBERG"),
            Self::Vwap => write!(f, "VWAP"),
            Self::Twap => write!(f, "TWAP"),
            Self::DarkPool => write!(f, "DARK_POOL"),
            Self::Smart => write!(f, "SMART"),
            Self::Reject => write!(f, "REJECT"),
        }
    }
}
