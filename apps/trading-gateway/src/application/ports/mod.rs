//! Port Interfaces
//!
//! Defines the interfaces (ports) for external systems following
//! the Hexagonal Architecture pattern.
//!
//! ## Driver Ports (Inbound)
//!
//! - [`Router`]: Polymorphic routing capability consulted by the selector
//!
//! ## Driven Ports (Outbound)
//!
//! - [`SessionSink`]: Send handle for one client session's transport
//! - [`BrokerConnections`]: Broker/venue directory with connectivity probes

mod broker;
mod router;
mod sink;

pub use broker::{BrokerConnections, VenueBinding};
pub use router::Router;
pub use sink::{SessionSink, SinkError};
