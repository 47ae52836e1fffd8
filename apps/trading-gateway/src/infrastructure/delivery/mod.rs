//! Market Data Delivery Path
//!
//! Fans each inbound market data event out to every session subscribed
//! to its symbol. Each send runs as its own task bounded by a timeout,
//! so one slow or broken session cannot stall delivery to the others.
//! Failed sessions are deregistered rather than surfaced to the
//! producer; delivery is at-most-once, never fatal.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::SinkError;
use crate::application::services::SessionRegistry;
use crate::domain::streaming::MarketDataEvent;
use crate::observability::record_delivery;

/// Per-session delivery failure. Internal to the fan-out.
#[derive(Debug, Error)]
enum DeliveryFailure {
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("send timed out")]
    Timeout,
}

/// Result of fanning out one event. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Sessions the event reached.
    pub delivered: usize,
    /// Sessions that failed and were scheduled for cleanup.
    pub failed: usize,
}

/// Cumulative delivery counters.
#[derive(Debug, Default)]
struct DeliveryStats {
    events: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    last_event_at: parking_lot::RwLock<Option<DateTime<Utc>>>,
}

/// Snapshot of the delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStatsSnapshot {
    /// Events fanned out.
    pub events: u64,
    /// Successful per-session sends.
    pub delivered: u64,
    /// Failed per-session sends.
    pub failed: u64,
}

/// Fan-out path from the inbound feed to subscribed sessions.
pub struct DeliveryPath {
    registry: Arc<SessionRegistry>,
    send_timeout: Duration,
    stats: DeliveryStats,
}

impl DeliveryPath {
    /// Create a delivery path over the shared registry.
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>, send_timeout: Duration) -> Self {
        Self {
            registry,
            send_timeout,
            stats: DeliveryStats::default(),
        }
    }

    /// Fan one event out to every matching session.
    ///
    /// Never returns an error: per-session failures deregister the
    /// session and are reported in the outcome for logging only.
    pub async fn deliver(&self, event: &MarketDataEvent) -> DeliveryOutcome {
        self.stats.events.fetch_add(1, Ordering::Relaxed);
        *self.stats.last_event_at.write() = Some(Utc::now());

        let targets = self.registry.subscribers_of(&event.symbol, event.kind);
        if targets.is_empty() {
            return DeliveryOutcome::default();
        }

        let mut handles = Vec::with_capacity(targets.len());
        for (session_id, sink) in targets {
            let event = event.clone();
            let send_timeout = self.send_timeout;
            handles.push(tokio::spawn(async move {
                let result = match tokio::time::timeout(send_timeout, sink.send(event)).await {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(error)) => Err(DeliveryFailure::from(error)),
                    Err(_) => Err(DeliveryFailure::Timeout),
                };
                (session_id, result)
            }));
        }

        let mut outcome = DeliveryOutcome::default();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok((_, Ok(()))) => outcome.delivered += 1,
                Ok((session_id, Err(failure))) => {
                    outcome.failed += 1;
                    tracing::warn!(
                        session_id = %session_id,
                        symbol = %event.symbol,
                        error = %failure,
                        "dropping session after failed delivery"
                    );
                    self.registry.deregister(&session_id);
                }
                Err(join_error) => {
                    outcome.failed += 1;
                    tracing::error!(%join_error, "delivery task panicked");
                }
            }
        }

        self.stats
            .delivered
            .fetch_add(outcome.delivered as u64, Ordering::Relaxed);
        self.stats
            .failed
            .fetch_add(outcome.failed as u64, Ordering::Relaxed);
        record_delivery(outcome.delivered as u64, outcome.failed as u64);

        outcome
    }

    /// Pump events from the inbound channel until cancelled.
    ///
    /// Events are processed sequentially, which preserves per-symbol,
    /// per-session arrival order whenever the sink transport preserves
    /// order. Fan-out within one event is still concurrent.
    pub async fn run(
        &self,
        mut events: mpsc::Receiver<MarketDataEvent>,
        shutdown: CancellationToken,
    ) {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("delivery pump shutting down");
                    break;
                }
                maybe_event = events.recv() => {
                    let Some(event) = maybe_event else {
                        tracing::info!("inbound event channel closed");
                        break;
                    };
                    let outcome = self.deliver(&event).await;
                    if outcome.failed > 0 {
                        tracing::debug!(
                            symbol = %event.symbol,
                            delivered = outcome.delivered,
                            failed = outcome.failed,
                            "fan-out completed with failures"
                        );
                    }
                }
            }
        }
    }

    /// Snapshot of the cumulative counters.
    #[must_use]
    pub fn stats(&self) -> DeliveryStatsSnapshot {
        DeliveryStatsSnapshot {
            events: self.stats.events.load(Ordering::Relaxed),
            delivered: self.stats.delivered.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }

    /// Timestamp of the most recent inbound event.
    #[must_use]
    pub fn last_event_at(&self) -> Option<DateTime<Utc>> {
        *self.stats.last_event_at.read()
    }
}
