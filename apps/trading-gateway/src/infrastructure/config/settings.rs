//! Gateway Configuration Settings
//!
//! Configuration types for the gateway core, loaded from environment
//! variables with sensible defaults. Unparseable optional values fall
//! back to their defaults; cross-field inconsistencies are errors.

use std::time::Duration;

use thiserror::Error;

/// Configuration loading/validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting holds a value that is inconsistent or out of range.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Dotted key of the offending setting.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Router set configuration.
#[derive(Debug, Clone)]
pub struct RoutingSettings {
    /// Exchanges that get a dedicated direct router.
    pub direct_exchanges: Vec<String>,
    /// Priority of the direct routers.
    pub direct_priority: u32,
    /// Largest order the direct routers accept.
    pub direct_max_quantity: u64,
    /// Working delay for scheduled limit orders, in seconds.
    pub scheduled_delay_secs: u64,
    /// Broker for dark pool crossings.
    pub dark_pool_broker: String,
    /// Dark pool venue identifier.
    pub dark_pool_venue: String,
    /// Smallest order the dark pool router accepts.
    pub dark_pool_min_quantity: u64,
    /// Expected crossing delay, in seconds.
    pub dark_pool_delay_secs: u64,
    /// Priority of the dark pool router.
    pub dark_pool_priority: u32,
    /// Smallest order the algorithmic router accepts.
    pub algo_min_quantity: u64,
    /// Largest order the algorithmic router accepts.
    pub algo_max_quantity: u64,
    /// Quantity at which slicing switches to iceberg.
    pub iceberg_threshold: u64,
    /// Algorithmic execution window, in seconds.
    pub algo_window_secs: u64,
    /// Priority of the algorithmic router.
    pub algo_priority: u32,
    /// Priority of the smart catch-all router.
    pub smart_priority: u32,
    /// Working delay for smart-routed limit orders, in seconds.
    pub smart_working_delay_secs: u64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            direct_exchanges: vec!["NYSE".to_string(), "NASDAQ".to_string()],
            direct_priority: 10,
            direct_max_quantity: 10_000,
            scheduled_delay_secs: 30,
            dark_pool_broker: "CROSSNET".to_string(),
            dark_pool_venue: "CROSSNET-DARK".to_string(),
            dark_pool_min_quantity: 250_000,
            dark_pool_delay_secs: 120,
            dark_pool_priority: 20,
            algo_min_quantity: 10_000,
            algo_max_quantity: 1_000_000,
            iceberg_threshold: 100_000,
            algo_window_secs: 900,
            algo_priority: 30,
            smart_priority: 100,
            smart_working_delay_secs: 10,
        }
    }
}

/// Session and delivery configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Maximum symbol subscriptions per session.
    pub max_subscriptions_per_session: usize,
    /// Per-session send timeout during fan-out.
    pub send_timeout: Duration,
    /// Capacity of the inbound event channel feeding the delivery pump.
    pub event_buffer_capacity: usize,
    /// Suggested capacity for per-session sink channels.
    pub session_buffer_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_subscriptions_per_session: 100,
            send_timeout: Duration::from_millis(500),
            event_buffer_capacity: 1_024,
            session_buffer_capacity: 256,
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Router set configuration.
    pub routing: RoutingSettings,
    /// Session and delivery configuration.
    pub session: SessionSettings,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut routing = RoutingSettings::default();
        if let Some(exchanges) = env_list("GATEWAY_DIRECT_EXCHANGES") {
            routing.direct_exchanges = exchanges;
        }
        routing.direct_max_quantity = parse_env_u64(
            "GATEWAY_DIRECT_MAX_QUANTITY",
            routing.direct_max_quantity,
        );
        routing.dark_pool_min_quantity = parse_env_u64(
            "GATEWAY_DARK_POOL_MIN_QUANTITY",
            routing.dark_pool_min_quantity,
        );
        routing.algo_min_quantity =
            parse_env_u64("GATEWAY_ALGO_MIN_QUANTITY", routing.algo_min_quantity);
        routing.algo_max_quantity =
            parse_env_u64("GATEWAY_ALGO_MAX_QUANTITY", routing.algo_max_quantity);
        routing.iceberg_threshold =
            parse_env_u64("GATEWAY_ICEBERG_THRESHOLD", routing.iceberg_threshold);

        let mut session = SessionSettings::default();
        session.max_subscriptions_per_session = parse_env_usize(
            "GATEWAY_MAX_SUBSCRIPTIONS",
            session.max_subscriptions_per_session,
        );
        session.send_timeout =
            parse_env_duration_millis("GATEWAY_SEND_TIMEOUT_MS", session.send_timeout);
        session.event_buffer_capacity = parse_env_usize(
            "GATEWAY_EVENT_BUFFER_CAPACITY",
            session.event_buffer_capacity,
        );
        session.session_buffer_capacity = parse_env_usize(
            "GATEWAY_SESSION_BUFFER_CAPACITY",
            session.session_buffer_capacity,
        );

        let config = Self { routing, session };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.max_subscriptions_per_session == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.max_subscriptions_per_session".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.session.send_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "session.send_timeout".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.session.event_buffer_capacity == 0 || self.session.session_buffer_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "session.event_buffer_capacity".to_string(),
                reason: "buffers must hold at least one event".to_string(),
            });
        }
        if self.routing.algo_min_quantity > self.routing.algo_max_quantity {
            return Err(ConfigError::InvalidValue {
                key: "routing.algo_max_quantity".to_string(),
                reason: "must be >= routing.algo_min_quantity".to_string(),
            });
        }
        if self.routing.iceberg_threshold > self.routing.algo_max_quantity {
            return Err(ConfigError::InvalidValue {
                key: "routing.iceberg_threshold".to_string(),
                reason: "must be <= routing.algo_max_quantity".to_string(),
            });
        }
        if self.routing.direct_exchanges.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "routing.direct_exchanges".to_string(),
                reason: "exchange names must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}

fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|value| parse_list(&value))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_millis(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .map_or(default, Duration::from_millis)
}
