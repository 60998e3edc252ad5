//! Telemetry-ingestion dispatch engine.
//!
//! Receives batches of heterogeneous, type-tagged records reported by
//! remote agents, demultiplexes them by type code, normalizes agent
//! and plugin heartbeats into connection-scoped state, forwards select
//! records to the task-reconciliation service, persists agent error
//! logs, emits process metrics, and republishes every record enriched
//! onto the outbound bus.

pub mod config;
pub mod error;
mod dispatch;
mod heartbeat;
mod metrics;
mod normalize;
mod pool;

pub use config::DispatchConfig;
pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use heartbeat::{update_agent_heartbeat, update_plugin_heartbeat};
pub use metrics::Metrics;
pub use normalize::normalize;
pub use pool::MessagePool;
