//! Session Sink Adapters
//!
//! Channel-backed implementation of the [`SessionSink`] port. The
//! transport layer owns the receiving half and frames events onto the
//! wire; this adapter only bridges the registry to that channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{SessionSink, SinkError};
use crate::domain::streaming::MarketDataEvent;

/// Sink over a bounded tokio mpsc channel.
///
/// `send` waits for buffer space, so a slow consumer exerts backpressure
/// here and the delivery path's timeout decides when the session is too
/// slow to keep.
pub struct ChannelSink {
    tx: mpsc::Sender<MarketDataEvent>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    #[must_use]
    pub const fn new(tx: mpsc::Sender<MarketDataEvent>) -> Self {
        Self { tx }
    }

    /// Create a sink and its paired receiver with the given capacity.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<MarketDataEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl SessionSink for ChannelSink {
    async fn send(&self, event: MarketDataEvent) -> Result<(), SinkError> {
        self.tx.send(event).await.map_err(|_| SinkError::Closed)
    }
}
