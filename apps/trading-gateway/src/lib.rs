#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Trading Gateway - Order Routing & Market Data Fan-out
//!
//! Library core for a trading gateway: routes inbound orders to
//! execution venues through a priority-ordered router set, and fans
//! live market data out to many concurrently connected subscriber
//! sessions. Persistence, authentication, and the wire protocol are
//! collaborator concerns behind the ports defined here.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Value objects and closed enumerations
//!   - `order`: Orders presented to the routing layer
//!   - `routing`: Strategy catalog, routing decision, error taxonomy
//!   - `session`: Session and subscription request/ack types
//!   - `streaming`: Market data event types
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: `Router`, `SessionSink`, `BrokerConnections`
//!   - `services`: Router selection, session registry, subscriptions
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `routers`: Direct, dark pool, algorithmic, and smart routers
//!   - `brokers`: In-memory broker directory
//!   - `sinks`: Channel-backed session sinks
//!   - `delivery`: Fan-out path with per-session failure isolation
//!   - `config`: Environment-driven configuration
//!
//! # Data Flow
//!
//! ```text
//!                 ┌──────────────┐
//! Order ─────────►│   Router     │────► RoutingDecision | RoutingError
//!                 │   Selector   │
//!                 └──────────────┘
//!
//!                 ┌──────────────┐     ┌─────────────┐──► Session 1
//! Market Data ───►│   Delivery   │────►│   Session   │──► Session 2
//! Events          │     Path     │     │   Registry  │──► Session N
//!                 └──────────────┘     └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Value objects with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Observability - Metrics export and tracing setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::order::{Order, OrderSide, OrderType};
pub use domain::routing::{ExecutionStrategy, RoutingDecision, RoutingError};
pub use domain::session::{
    SessionId, SessionWelcome, SubscriptionAck, SubscriptionAction, SubscriptionError,
    SubscriptionRequest, Symbol,
};
pub use domain::streaming::{MarketDataEvent, MarketDataType};

// Ports
pub use application::ports::{BrokerConnections, Router, SessionSink, SinkError, VenueBinding};

// Application services
pub use application::services::{
    RegistryStats, RouterSelector, SessionRegistry, SubscriptionService,
};

// Infrastructure adapters
pub use infrastructure::brokers::StaticBrokerDirectory;
pub use infrastructure::config::{ConfigError, GatewayConfig, RoutingSettings, SessionSettings};
pub use infrastructure::delivery::{DeliveryOutcome, DeliveryPath, DeliveryStatsSnapshot};
pub use infrastructure::routers::{
    AlgoRouter, DarkPoolRouter, ExchangeRouter, SmartRouter, router_set,
};
pub use infrastructure::sinks::ChannelSink;

// Observability
pub use observability::{init_metrics, init_tracing, try_init_tracing};
