//! Session registry.
//!
//! Concurrent mapping from session identifier to a live send handle and
//! the session's subscribed-symbol set. All mutation is key-scoped: the
//! maps are sharded and entries are locked per key, so operations on
//! unrelated sessions never serialize on a global lock.
//!
//! # Invariant
//!
//! Per-session linearizability: the subscription set observed for a
//! session is always the result of some prefix of that session's
//! completed subscribe/unsubscribe calls. Mutations for one session are
//! applied under that session's entry lock; cross-session state has no
//! ordering requirement.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::application::ports::SessionSink;
use crate::domain::session::{SessionId, SessionWelcome, SubscriptionError, Symbol};
use crate::domain::streaming::MarketDataType;

/// Subscription state for one session.
#[derive(Debug, Default, Clone)]
struct SessionSubscriptions {
    /// Symbols the session is subscribed to.
    symbols: HashSet<Symbol>,
    /// Data types the session wants. Empty means all types.
    data_types: HashSet<MarketDataType>,
}

/// Snapshot of registry occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Registered sessions.
    pub sessions: usize,
    /// Sessions with at least one subscription.
    pub subscribed_sessions: usize,
    /// Total symbol subscriptions across all sessions.
    pub total_subscriptions: usize,
}

/// Concurrent session/subscription registry.
///
/// Two maps keyed by session id: one to the live send handle, one to the
/// subscription set. A session with no subscriptions has no entry in the
/// subscription map, so churn does not grow memory.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<dyn SessionSink>>,
    subscriptions: DashMap<SessionId, SessionSubscriptions>,
    max_subscriptions: usize,
}

impl SessionRegistry {
    /// Create a registry enforcing `max_subscriptions` symbols per session.
    #[must_use]
    pub fn new(max_subscriptions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            subscriptions: DashMap::new(),
            max_subscriptions,
        }
    }

    /// Per-session subscription limit.
    #[must_use]
    pub const fn max_subscriptions(&self) -> usize {
        self.max_subscriptions
    }

    /// Register a session's send handle.
    ///
    /// Idempotent: registering an existing id replaces the handle and
    /// keeps the subscription set.
    pub fn register(&self, session_id: &str, sink: Arc<dyn SessionSink>) -> SessionWelcome {
        self.sessions.insert(session_id.to_string(), sink);
        tracing::debug!(session_id, "session registered");

        SessionWelcome {
            session_id: session_id.to_string(),
            max_subscriptions: self.max_subscriptions,
            message: format!(
                "connected; up to {} symbol subscriptions per session",
                self.max_subscriptions
            ),
        }
    }

    /// Whether a session is registered.
    #[must_use]
    pub fn is_registered(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Union `symbols` into the session's subscription set.
    ///
    /// Creates the set if absent. Returns the resulting active count.
    /// Rejects the whole request, leaving state untouched, if the result
    /// would exceed the per-session limit.
    pub fn subscribe(
        &self,
        session_id: &str,
        symbols: &[Symbol],
        data_types: &[MarketDataType],
    ) -> Result<usize, SubscriptionError> {
        if !self.is_registered(session_id) {
            return Err(SubscriptionError::UnknownSession {
                session_id: session_id.to_string(),
            });
        }

        match self.subscriptions.entry(session_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let subs = occupied.get_mut();
                let additional = symbols
                    .iter()
                    .filter(|symbol| !subs.symbols.contains(*symbol))
                    .collect::<HashSet<_>>()
                    .len();
                let resulting = subs.symbols.len() + additional;
                if resulting > self.max_subscriptions {
                    return Err(SubscriptionError::CapacityExceeded {
                        requested: resulting,
                        limit: self.max_subscriptions,
                    });
                }
                subs.symbols.extend(symbols.iter().cloned());
                subs.data_types.extend(data_types.iter().copied());
                Ok(subs.symbols.len())
            }
            Entry::Vacant(vacant) => {
                let unique: HashSet<Symbol> = symbols.iter().cloned().collect();
                if unique.len() > self.max_subscriptions {
                    return Err(SubscriptionError::CapacityExceeded {
                        requested: unique.len(),
                        limit: self.max_subscriptions,
                    });
                }
                let count = unique.len();
                vacant.insert(SessionSubscriptions {
                    symbols: unique,
                    data_types: data_types.iter().copied().collect(),
                });
                Ok(count)
            }
        }
    }

    /// Remove `symbols` from the session's subscription set.
    ///
    /// Removing the last symbol removes the session's subscription entry
    /// entirely. Returns the resulting active count.
    pub fn unsubscribe(
        &self,
        session_id: &str,
        symbols: &[Symbol],
    ) -> Result<usize, SubscriptionError> {
        if !self.is_registered(session_id) {
            return Err(SubscriptionError::UnknownSession {
                session_id: session_id.to_string(),
            });
        }

        match self.subscriptions.entry(session_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let subs = occupied.get_mut();
                for symbol in symbols {
                    subs.symbols.remove(symbol);
                }
                let remaining = subs.symbols.len();
                if remaining == 0 {
                    occupied.remove();
                }
                Ok(remaining)
            }
            // Never subscribed: nothing to remove.
            Entry::Vacant(_) => Ok(0),
        }
    }

    /// Remove the session's handle and all of its subscriptions.
    ///
    /// Safe to call for sessions that were never registered or never
    /// subscribed; returns whether a handle was actually removed.
    pub fn deregister(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        self.subscriptions.remove(session_id);
        if removed {
            tracing::debug!(session_id, "session deregistered");
        }
        removed
    }

    /// Session's current active subscription count.
    #[must_use]
    pub fn active_subscriptions(&self, session_id: &str) -> usize {
        self.subscriptions
            .get(session_id)
            .map_or(0, |subs| subs.symbols.len())
    }

    /// Snapshot of the sessions subscribed to `symbol` for `kind` data.
    ///
    /// A session that declared no data types receives all types. The
    /// snapshot is eventually consistent with concurrent mutation; the
    /// delivery path tolerates stale entries.
    #[must_use]
    pub fn subscribers_of(
        &self,
        symbol: &str,
        kind: MarketDataType,
    ) -> Vec<(SessionId, Arc<dyn SessionSink>)> {
        let mut targets = Vec::new();
        for entry in self.subscriptions.iter() {
            let subs = entry.value();
            if !subs.symbols.contains(symbol) {
                continue;
            }
            if !subs.data_types.is_empty() && !subs.data_types.contains(&kind) {
                continue;
            }
            if let Some(sink) = self.sessions.get(entry.key()) {
                targets.push((entry.key().clone(), Arc::clone(sink.value())));
            }
        }
        targets
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Occupancy snapshot.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        let total_subscriptions = self
            .subscriptions
            .iter()
            .map(|entry| entry.value().symbols.len())
            .sum();
        RegistryStats {
            sessions: self.sessions.len(),
            subscribed_sessions: self.subscriptions.len(),
            total_subscriptions,
        }
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .field("subscribed_sessions", &self.subscriptions.len())
            .field("max_subscriptions", &self.max_subscriptions)
            .finish()
    }
}
