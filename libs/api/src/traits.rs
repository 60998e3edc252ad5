use std::future::Future;
use std::pin::Pin;

use crate::detail::Detail;
use crate::error::AgentError;
use crate::wire::{FieldMap, OutboundMessage};

// ════════════════════════════════════════════════════════════════
//  Collaborator Traits
// ════════════════════════════════════════════════════════════════

/// Per-agent session state owned by the transport layer.
///
/// The dispatcher only reads the source address / creation time and
/// issues upsert calls; the implementation serializes concurrent
/// writers if its transport can deliver concurrent batches for the
/// same connection. Upserts are last-write-wins, no history retained.
pub trait ConnectionState: Send + Sync {
    /// Remote address the agent connected from.
    fn source_addr(&self) -> String;

    /// Unix time (seconds) the connection was established.
    fn created_at(&self) -> i64;

    /// Overwrite the agent-level detail map.
    fn set_agent_detail(&self, detail: Detail);

    /// Overwrite the detail map of one plugin, keyed by plugin name.
    fn set_plugin_detail(&self, name: &str, detail: Detail);
}

/// Outbound message bus. One publish per inbound record, keyed by
/// agent id. Synchronous from the dispatcher's point of view: the
/// pooled message becomes eligible for reuse once the call returns.
pub trait OutboundBus: Send + Sync {
    fn publish(
        &self,
        key: &str,
        msg: &OutboundMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + '_>>;
}

/// Remote task-reconciliation service. Submission failures are logged
/// and swallowed by the caller — no retry, no backpressure.
pub trait TaskService: Send + Sync {
    fn submit(
        &self,
        fields: FieldMap,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + '_>>;
}

/// Log store for agent / plugin error logs, keyed by agent id.
pub trait LogStore: Send + Sync {
    fn persist(
        &self,
        agent_id: &str,
        fields: &FieldMap,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + '_>>;
}

/// Session registry: batch-wide tag lookup, once per dispatch call.
pub trait SessionRegistry: Send + Sync {
    /// Tag for this agent, `None` when the registry has no entry.
    fn lookup(&self, agent_id: &str) -> Option<String>;
}
