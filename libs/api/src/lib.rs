//! Domain types and collaborator traits for the telemetry-ingestion
//! dispatcher: wire messages, decoded field maps, coerced detail maps,
//! and the external interfaces (connection state, outbound bus, task
//! service, log store, session registry) the engine is wired against.

pub mod detail;
pub mod error;
pub mod traits;
pub mod util;
pub mod wire;

pub use detail::{Detail, DetailValue};
pub use error::{AgentError, ErrorKind};
pub use traits::{ConnectionState, LogStore, OutboundBus, SessionRegistry, TaskService};
pub use util::now_secs;
pub use wire::{
    decode_fields, FieldMap, Item, OutboundMessage, RawBatch, RawRecord,
    DT_AGENT_ERROR_LOG, DT_AGENT_HEARTBEAT, DT_PLUGIN_ERROR_LOG, DT_PLUGIN_HEARTBEAT,
    DT_TASK_ASSET, DT_TASK_RESULT, DT_TASK_STATUS,
};
