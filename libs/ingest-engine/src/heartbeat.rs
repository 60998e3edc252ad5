use agent_api::{
    decode_fields, now_secs, AgentError, ConnectionState, Detail, DetailValue, RawBatch, RawRecord,
};

use crate::normalize::normalize;

// ═══════════════════════════════════════════════════════════════
//  Heartbeat State Updaters
// ═══════════════════════════════════════════════════════════════

/// Keys kept verbatim as text during agent-heartbeat normalization.
const AGENT_PASSTHROUGH: &[&str] = &["platform_version"];

/// Keys kept verbatim as text during plugin-heartbeat normalization.
const PLUGIN_PASSTHROUGH: &[&str] = &["pversion"];

/// Normalize an agent heartbeat and upsert it into the connection's
/// agent-level detail (overwrite semantics).
///
/// The decoded fields are merged with administrative fields: agent
/// identity, connection source address and creation time, the four
/// address lists (empty lists when the batch carries none), version,
/// hostname, product, and the server-side `last_heartbeat_time`.
///
/// Returns the detail map for gauge projection. A decode failure skips
/// this record's path only; the caller still publishes outbound.
pub fn update_agent_heartbeat(
    record: &RawRecord,
    batch: &RawBatch,
    conn: &dyn ConnectionState,
) -> Result<Detail, AgentError> {
    let fields = decode_fields(&record.body)?;

    let mut detail = normalize(&fields, AGENT_PASSTHROUGH);
    detail.insert("agent_id".into(), batch.agent_id.clone().into());
    detail.insert("agent_addr".into(), conn.source_addr().into());
    detail.insert("create_at".into(), DetailValue::Number(conn.created_at() as f64));
    detail.insert("intranet_ipv4".into(), batch.intranet_ipv4.clone().into());
    detail.insert("extranet_ipv4".into(), batch.extranet_ipv4.clone().into());
    detail.insert("intranet_ipv6".into(), batch.intranet_ipv6.clone().into());
    detail.insert("extranet_ipv6".into(), batch.extranet_ipv6.clone().into());
    detail.insert("version".into(), batch.version.clone().into());
    detail.insert("hostname".into(), batch.hostname.clone().into());
    detail.insert("product".into(), batch.product.clone().into());
    // Heartbeat time is taken server-side, not from the record.
    detail.insert("last_heartbeat_time".into(), DetailValue::Number(now_secs() as f64));

    conn.set_agent_detail(detail.clone());
    Ok(detail)
}

/// Normalize a plugin heartbeat and upsert it into the connection's
/// plugin-level detail, keyed by the plugin name.
///
/// Requires a `name` field in the decoded map; its absence skips the
/// entire path (`ErrorKind::MissingField`). Unlike the agent path no
/// administrative or address fields are merged — only the normalized
/// fields plus `last_heartbeat_time`.
///
/// Returns the plugin name (the metrics subject) and the detail map.
pub fn update_plugin_heartbeat(
    record: &RawRecord,
    conn: &dyn ConnectionState,
) -> Result<(String, Detail), AgentError> {
    let fields = decode_fields(&record.body)?;

    let name = fields
        .get("name")
        .cloned()
        .ok_or_else(|| AgentError::missing_field("plugin heartbeat without name field"))?;

    let mut detail = normalize(&fields, PLUGIN_PASSTHROUGH);
    detail.insert("last_heartbeat_time".into(), DetailValue::Number(now_secs() as f64));

    conn.set_plugin_detail(&name, detail.clone());
    Ok((name, detail))
}
