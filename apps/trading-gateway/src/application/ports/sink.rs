//! Session Sink Port (Driven Port)
//!
//! Interface for pushing market data to one client session's transport.
//! Adapters own framing, buffering, and the underlying connection.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::streaming::MarketDataEvent;

/// Failure to hand an event to a session's transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The session's transport is closed.
    #[error("session transport closed")]
    Closed,

    /// The session's send buffer is full.
    #[error("session send buffer full")]
    Full,
}

/// Send-capable handle for one client session.
#[async_trait]
pub trait SessionSink: Send + Sync {
    /// Push one event to the session.
    ///
    /// May wait for buffer space; the delivery path bounds the wait with
    /// its own timeout.
    async fn send(&self, event: MarketDataEvent) -> Result<(), SinkError>;
}
