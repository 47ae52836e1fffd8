//! Routing decision value object.
//!
//! The immutable outcome of one routing attempt. Built through the
//! canonical constructors so the confidence/immediacy invariants hold by
//! construction; rebuilt (never mutated) if an amendment is needed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::strategy::ExecutionStrategy;

/// Resolved outcome of routing one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Broker the order is handed to. Empty for rejections.
    pub broker_id: String,
    /// Execution venue (exchange, dark pool, broker-internal matcher).
    pub venue: String,
    /// Strategy the order will be executed with.
    pub strategy: ExecutionStrategy,
    /// Whether the order executes without delay.
    pub immediate_execution: bool,
    /// Estimated execution time.
    pub estimated_execution: DateTime<Utc>,
    /// Confidence in the decision, in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Human-readable explanation of the decision.
    pub reason: String,
    /// Name of the router that produced the decision.
    pub router_name: String,
    /// Time spent producing the decision.
    #[serde(skip)]
    pub processing_time: Duration,
}

impl RoutingDecision {
    /// Decision that executes immediately with full confidence.
    #[must_use]
    pub fn immediate(
        broker_id: impl Into<String>,
        venue: impl Into<String>,
        strategy: ExecutionStrategy,
        reason: impl Into<String>,
        router_name: impl Into<String>,
    ) -> Self {
        Self {
            broker_id: broker_id.into(),
            venue: venue.into(),
            strategy,
            immediate_execution: true,
            estimated_execution: Utc::now(),
            confidence: 1.0,
            reason: reason.into(),
            router_name: router_name.into(),
            processing_time: Duration::ZERO,
        }
    }

    /// Decision that defers execution to `execution_time`.
    ///
    /// Confidence is clamped to `[0.0, 1.0]`.
    #[must_use]
    pub fn delayed(
        broker_id: impl Into<String>,
        venue: impl Into<String>,
        strategy: ExecutionStrategy,
        execution_time: DateTime<Utc>,
        confidence: f64,
        reason: impl Into<String>,
        router_name: impl Into<String>,
    ) -> Self {
        Self {
            broker_id: broker_id.into(),
            venue: venue.into(),
            strategy,
            immediate_execution: false,
            estimated_execution: execution_time,
            confidence: confidence.clamp(0.0, 1.0),
            reason: reason.into(),
            router_name: router_name.into(),
            processing_time: Duration::ZERO,
        }
    }

    /// Rejection decision. Always zero confidence and never immediate.
    #[must_use]
    pub fn reject(reason: impl Into<String>, router_name: impl Into<String>) -> Self {
        Self {
            broker_id: String::new(),
            venue: String::new(),
            strategy: ExecutionStrategy::Reject,
            immediate_execution: false,
            estimated_execution: Utc::now(),
            confidence: 0.0,
            reason: reason.into(),
            router_name: router_name.into(),
            processing_time: Duration::ZERO,
        }
    }

    /// Rebuild the decision with the measured processing duration.
    #[must_use]
    pub fn with_processing_time(mut self, processing_time: Duration) -> Self {
        self.processing_time = processing_time;
        self
    }

    /// Returns true if the order was rejected rather than routed.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.strategy == ExecutionStrategy::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_sets_flag_and_full_confidence() {
        let decision = RoutingDecision::immediate(
            "ALPACA",
            "NYSE",
            ExecutionStrategy::Immediate,
            "market order, direct route",
            "nyse-direct",
        );

        assert!(decision.immediate_execution);
        assert!((decision.confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(decision.strategy, ExecutionStrategy::Immediate);
        assert!(!decision.is_rejection());
    }

    #[test]
    fn delayed_clamps_confidence() {
        let when = Utc::now() + chrono::Duration::minutes(5);

        let over = RoutingDecision::delayed(
            "ALPACA",
            "NYSE",
            ExecutionStrategy::Twap,
            when,
            1.7,
            "twap window",
            "algo",
        );
        assert!((over.confidence - 1.0).abs() < f64::EPSILON);

        let under = RoutingDecision::delayed(
            "ALPACA",
            "NYSE",
            ExecutionStrategy::Twap,
            when,
            -0.3,
            "twap window",
            "algo",
        );
        assert!(under.confidence.abs() < f64::EPSILON);
        assert!(!under.immediate_execution);
        assert_eq!(under.estimated_execution, when);
    }

    #[test]
    fn reject_is_zero_confidence_and_not_immediate() {
        for reason in ["no venue", "", "halted symbol"] {
            for router in ["smart", "fallback"] {
                let decision = RoutingDecision::reject(reason, router);
                assert!(decision.confidence.abs() < f64::EPSILON);
                assert!(!decision.immediate_execution);
                assert_eq!(decision.strategy, ExecutionStrategy::Reject);
                assert!(decision.broker_id.is_empty());
                assert!(decision.is_rejection());
                assert_eq!(decision.router_name, router);
            }
        }
    }

    #[test]
    fn with_processing_time_rebuilds() {
        let decision = RoutingDecision::reject("no venue", "smart")
            .with_processing_time(Duration::from_micros(250));
        assert_eq!(decision.processing_time, Duration::from_micros(250));
    }

    #[test]
    fn decision_serializes_without_processing_time() {
        let decision = RoutingDecision::immediate(
            "ALPACA",
            "NYSE",
            ExecutionStrategy::Immediate,
            "direct",
            "nyse-direct",
        );
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["strategy"], "IMMEDIATE");
        assert!(json.get("processing_time").is_none());
    }
}
