use std::collections::HashMap;

use prost::Message;

use crate::error::AgentError;

// ════════════════════════════════════════════════════════════════
//  Data Type Codes
// ════════════════════════════════════════════════════════════════

/// Agent heartbeat — normalized into connection-scoped agent detail.
pub const DT_AGENT_HEARTBEAT: i32 = 1000;
/// Plugin heartbeat — normalized into per-plugin connection detail.
pub const DT_PLUGIN_HEARTBEAT: i32 = 1001;
/// Task results forwarded to the reconciliation service.
pub const DT_TASK_RESULT: i32 = 2001;
pub const DT_TASK_STATUS: i32 = 2003;
pub const DT_TASK_ASSET: i32 = 6003;
/// Agent / plugin error logs, persisted to the log store.
pub const DT_AGENT_ERROR_LOG: i32 = 1010;
pub const DT_PLUGIN_ERROR_LOG: i32 = 1011;

// ════════════════════════════════════════════════════════════════
//  Wire Messages
// ════════════════════════════════════════════════════════════════

/// One inbound delivery unit: agent identity + ordered records.
///
/// Delivered by the external transport layer, once per dispatch call.
/// Address lists may legitimately be empty.
#[derive(Clone, PartialEq, Message)]
pub struct RawBatch {
    #[prost(string, tag = "1")]
    pub agent_id: String,
    #[prost(string, tag = "2")]
    pub hostname: String,
    #[prost(string, tag = "3")]
    pub version: String,
    #[prost(string, tag = "4")]
    pub product: String,
    #[prost(string, repeated, tag = "5")]
    pub intranet_ipv4: Vec<String>,
    #[prost(string, repeated, tag = "6")]
    pub extranet_ipv4: Vec<String>,
    #[prost(string, repeated, tag = "7")]
    pub intranet_ipv6: Vec<String>,
    #[prost(string, repeated, tag = "8")]
    pub extranet_ipv6: Vec<String>,
    #[prost(message, repeated, tag = "9")]
    pub records: Vec<RawRecord>,
}

/// Single telemetry unit: type code, per-record timestamp, opaque body.
/// Immutable once received; the body schema is agent-defined.
#[derive(Clone, PartialEq, Message)]
pub struct RawRecord {
    #[prost(int32, tag = "1")]
    pub data_type: i32,
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
    #[prost(bytes = "vec", tag = "3")]
    pub body: Vec<u8>,
}

/// Record-body payload: a flat string-keyed field map.
#[derive(Clone, PartialEq, Message)]
pub struct Item {
    #[prost(map = "string, string", tag = "1")]
    pub fields: HashMap<String, String>,
}

/// Enriched record ready for bus publication. Pooled and reused across
/// dispatch calls: every field is overwritten before each publish, so
/// no field may be assumed to retain a prior occupant's value.
#[derive(Clone, PartialEq, Message)]
pub struct OutboundMessage {
    #[prost(int32, tag = "1")]
    pub data_type: i32,
    /// Per-record timestamp as reported by the agent.
    #[prost(int64, tag = "2")]
    pub agent_time: i64,
    #[prost(bytes = "vec", tag = "3")]
    pub body: Vec<u8>,
    #[prost(string, tag = "4")]
    pub agent_id: String,
    /// Comma-joined address lists, computed once per batch.
    #[prost(string, tag = "5")]
    pub intranet_ipv4: String,
    #[prost(string, tag = "6")]
    pub extranet_ipv4: String,
    #[prost(string, tag = "7")]
    pub intranet_ipv6: String,
    #[prost(string, tag = "8")]
    pub extranet_ipv6: String,
    #[prost(string, tag = "9")]
    pub hostname: String,
    #[prost(string, tag = "10")]
    pub version: String,
    #[prost(string, tag = "11")]
    pub product: String,
    /// Server receipt time, shared by every record in the same batch.
    #[prost(int64, tag = "12")]
    pub svr_time: i64,
    /// Session tag from the registry; empty when absent.
    #[prost(string, tag = "13")]
    pub tag: String,
    // Reserved plugin routing fields, unused for now but kept for
    // wire compatibility with downstream consumers.
    #[prost(string, tag = "14")]
    pub psm_name: String,
    #[prost(string, tag = "15")]
    pub psm_path: String,
}

// ════════════════════════════════════════════════════════════════
//  Record Parser
// ════════════════════════════════════════════════════════════════

/// Decode an opaque record body into its flat field map.
///
/// Failure means "skip this record's special-case handling", never
/// a fatal condition for the surrounding batch.
pub fn decode_fields(body: &[u8]) -> Result<FieldMap, AgentError> {
    let item = Item::decode(body)?;
    Ok(item.fields)
}

/// Decoded string-keyed record payload.
pub type FieldMap = HashMap<String, String>;
