//! Subscription management.
//!
//! Handles a session's subscribe/unsubscribe requests against the
//! registry and produces the confirmations the transport layer sends
//! back. Failures reject the single request and leave the session's
//! existing subscriptions untouched.

use std::sync::Arc;

use crate::application::ports::SessionSink;
use crate::application::services::registry::SessionRegistry;
use crate::domain::session::{
    SessionWelcome, SubscriptionAck, SubscriptionAction, SubscriptionError, SubscriptionRequest,
    Symbol,
};
use crate::observability::set_session_gauges;

/// Subscription manager for all client sessions.
pub struct SubscriptionService {
    registry: Arc<SessionRegistry>,
}

impl SubscriptionService {
    /// Create a service over the shared registry.
    #[must_use]
    pub const fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Register a newly connected session and build its welcome payload.
    pub fn connect(&self, session_id: &str, sink: Arc<dyn SessionSink>) -> SessionWelcome {
        let welcome = self.registry.register(session_id, sink);
        tracing::info!(session_id, "session connected");
        self.publish_gauges();
        welcome
    }

    /// Drop a session and all of its subscriptions.
    ///
    /// Called on disconnect or transport error; safe to call repeatedly.
    pub fn disconnect(&self, session_id: &str) {
        if self.registry.deregister(session_id) {
            tracing::info!(session_id, "session disconnected");
        }
        self.publish_gauges();
    }

    /// Apply one subscription request for a session.
    pub fn handle(
        &self,
        session_id: &str,
        request: &SubscriptionRequest,
    ) -> Result<SubscriptionAck, SubscriptionError> {
        let symbols = normalize_symbols(&request.symbols);
        if symbols.is_empty() {
            return Err(SubscriptionError::EmptySymbolSet);
        }

        let result = match request.action {
            SubscriptionAction::Subscribe => {
                self.registry
                    .subscribe(session_id, &symbols, &request.data_types)
            }
            SubscriptionAction::Unsubscribe => self.registry.unsubscribe(session_id, &symbols),
        };

        match result {
            Ok(active_subscriptions) => {
                let verb = match request.action {
                    SubscriptionAction::Subscribe => "subscribed to",
                    SubscriptionAction::Unsubscribe => "unsubscribed from",
                };
                tracing::debug!(
                    session_id,
                    count = symbols.len(),
                    active = active_subscriptions,
                    "{verb} symbols"
                );
                self.publish_gauges();
                Ok(SubscriptionAck {
                    success: true,
                    message: format!("{verb} {} symbol(s)", symbols.len()),
                    symbols,
                    active_subscriptions,
                })
            }
            Err(error) => {
                tracing::warn!(session_id, code = error.code(), %error, "subscription request rejected");
                Err(error)
            }
        }
    }

    fn publish_gauges(&self) {
        let stats = self.registry.stats();
        set_session_gauges(stats.sessions, stats.total_subscriptions);
    }
}

/// Drop blank symbols and duplicates, keeping first-seen order.
fn normalize_symbols(symbols: &[Symbol]) -> Vec<Symbol> {
    let mut seen = std::collections::HashSet::new();
    symbols
        .iter()
        .map(|symbol| symbol.trim())
        .filter(|symbol| !symbol.is_empty())
        .filter(|symbol| seen.insert((*symbol).to_string()))
        .map(str::to_string)
        .collect()
}
