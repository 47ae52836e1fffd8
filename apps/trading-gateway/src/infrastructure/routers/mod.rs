//! Concrete Routers
//!
//! The router set consulted by the selector. Which routers exist, their
//! priorities, and their size thresholds all come from configuration;
//! the selector itself knows nothing about any of them.

mod algo;
mod dark_pool;
mod exchange;
mod smart;

use std::sync::Arc;

pub use algo::AlgoRouter;
pub use dark_pool::DarkPoolRouter;
pub use exchange::ExchangeRouter;
pub use smart::SmartRouter;

use crate::application::ports::{BrokerConnections, Router};
use crate::infrastructure::config::RoutingSettings;

fn seconds(value: u64) -> chrono::Duration {
    i64::try_from(value)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}

/// Build the configured router set.
///
/// One direct router per configured exchange, then the dark pool,
/// algorithmic, and smart catch-all routers. Registration order breaks
/// priority ties.
#[must_use]
pub fn router_set(
    settings: &RoutingSettings,
    directory: Arc<dyn BrokerConnections>,
) -> Vec<Arc<dyn Router>> {
    let mut routers: Vec<Arc<dyn Router>> = Vec::new();

    for exchange in &settings.direct_exchanges {
        routers.push(Arc::new(ExchangeRouter::new(
            exchange.clone(),
            settings.direct_priority,
            settings.direct_max_quantity,
            seconds(settings.scheduled_delay_secs),
            Arc::clone(&directory),
        )));
    }

    routers.push(Arc::new(DarkPoolRouter::new(
        settings.dark_pool_broker.clone(),
        settings.dark_pool_venue.clone(),
        settings.dark_pool_min_quantity,
        seconds(settings.dark_pool_delay_secs),
        settings.dark_pool_priority,
    )));

    routers.push(Arc::new(AlgoRouter::new(
        settings.algo_min_quantity,
        settings.algo_max_quantity,
        settings.iceberg_threshold,
        seconds(settings.algo_window_secs),
        settings.algo_priority,
        Arc::clone(&directory),
    )));

    routers.push(Arc::new(SmartRouter::new(
        settings.smart_priority,
        seconds(settings.smart_working_delay_secs),
        directory,
    )));

    routers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::brokers::StaticBrokerDirectory;

    #[test]
    fn default_settings_build_full_router_set() {
        let settings = RoutingSettings::default();
        let directory = Arc::new(StaticBrokerDirectory::new());

        let routers = router_set(&settings, directory);

        // Two direct routers plus dark pool, algo, and smart.
        assert_eq!(routers.len(), settings.direct_exchanges.len() + 3);
        let names: Vec<_> = routers.iter().map(|r| r.name().to_string()).collect();
        assert!(names.contains(&"dark-pool".to_string()));
        assert!(names.contains(&"algo-slicer".to_string()));
        assert!(names.contains(&"smart-router".to_string()));
    }

    #[test]
    fn router_names_are_unique() {
        let settings = RoutingSettings::default();
        let directory = Arc::new(StaticBrokerDirectory::new());

        let routers = router_set(&settings, directory);
        let mut names: Vec<_> = routers.iter().map(|r| r.name().to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), routers.len());
    }
}
