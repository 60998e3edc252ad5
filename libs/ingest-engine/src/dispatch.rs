use std::sync::Arc;

use prometheus::Registry;

use agent_api::{
    decode_fields, now_secs, ConnectionState, LogStore, OutboundBus, OutboundMessage, RawBatch,
    RawRecord, SessionRegistry, TaskService, DT_AGENT_ERROR_LOG, DT_AGENT_HEARTBEAT,
    DT_PLUGIN_ERROR_LOG, DT_PLUGIN_HEARTBEAT, DT_TASK_ASSET, DT_TASK_RESULT, DT_TASK_STATUS,
};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::heartbeat::{update_agent_heartbeat, update_plugin_heartbeat};
use crate::metrics::Metrics;
use crate::pool::MessagePool;

// ═══════════════════════════════════════════════════════════════
//  Batch Scope
// ═══════════════════════════════════════════════════════════════

/// Fields computed once per batch and shared by every record in it.
struct BatchScope {
    intranet_ipv4: String,
    extranet_ipv4: String,
    intranet_ipv6: String,
    extranet_ipv6: String,
    svr_time: i64,
    tag: String,
}

impl BatchScope {
    fn from_batch(batch: &RawBatch, sessions: &dyn SessionRegistry) -> Self {
        Self {
            intranet_ipv4: batch.intranet_ipv4.join(","),
            extranet_ipv4: batch.extranet_ipv4.join(","),
            intranet_ipv6: batch.intranet_ipv6.join(","),
            extranet_ipv6: batch.extranet_ipv6.join(","),
            svr_time: now_secs(),
            tag: sessions.lookup(&batch.agent_id).unwrap_or_default(),
        }
    }
}

/// Overwrite every field of a pooled message from the current record
/// and batch scope. The message may carry a previous occupant's
/// values, so no field is allowed to survive untouched.
fn fill_outbound(
    msg: &mut OutboundMessage,
    record: &RawRecord,
    batch: &RawBatch,
    scope: &BatchScope,
) {
    msg.data_type = record.data_type;
    msg.agent_time = record.timestamp;
    msg.body.clone_from(&record.body);
    msg.agent_id.clone_from(&batch.agent_id);
    msg.intranet_ipv4.clone_from(&scope.intranet_ipv4);
    msg.extranet_ipv4.clone_from(&scope.extranet_ipv4);
    msg.intranet_ipv6.clone_from(&scope.intranet_ipv6);
    msg.extranet_ipv6.clone_from(&scope.extranet_ipv6);
    msg.hostname.clone_from(&batch.hostname);
    msg.version.clone_from(&batch.version);
    msg.product.clone_from(&batch.product);
    msg.svr_time = scope.svr_time;
    msg.tag.clone_from(&scope.tag);
    msg.psm_name.clear();
    msg.psm_path.clear();
}

// ═══════════════════════════════════════════════════════════════
//  Dispatcher
// ═══════════════════════════════════════════════════════════════

/// Per-batch telemetry dispatcher: demultiplexes records by type code,
/// maintains connection-scoped heartbeat state, forwards task records,
/// persists error logs, and republishes every record enriched onto the
/// outbound bus.
///
/// Stateless per call: all durable state lives in the connection
/// object and the metrics registry. Batches from different connections
/// may be dispatched concurrently; records within one batch are
/// processed strictly in delivery order.
pub struct Dispatcher {
    bus: Arc<dyn OutboundBus>,
    tasks: Arc<dyn TaskService>,
    logs: Arc<dyn LogStore>,
    sessions: Arc<dyn SessionRegistry>,
    metrics: Metrics,
    pool: MessagePool,
}

impl Dispatcher {
    pub fn new(
        config: &DispatchConfig,
        registry: Registry,
        bus: Arc<dyn OutboundBus>,
        tasks: Arc<dyn TaskService>,
        logs: Arc<dyn LogStore>,
        sessions: Arc<dyn SessionRegistry>,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            bus,
            tasks,
            logs,
            sessions,
            metrics: Metrics::new(registry, &config.heartbeat_gauges)?,
            pool: MessagePool::new(config.pool_capacity),
        })
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Drive one batch. Returns the batch's agent id.
    ///
    /// Per record: counters are bumped and an enriched copy is
    /// published outbound unconditionally; exactly one type-specific
    /// path (or none) runs in between. No record-level failure aborts
    /// the batch — every error degrades to "skip this record's path".
    pub async fn dispatch(&self, batch: &RawBatch, conn: &dyn ConnectionState) -> String {
        let scope = BatchScope::from_batch(batch, &*self.sessions);

        for record in &batch.records {
            tracing::debug!(
                agent_id = %batch.agent_id,
                data_type = record.data_type,
                timestamp = record.timestamp,
                "record received"
            );
            self.metrics.count_record(record.data_type, &batch.agent_id);

            match record.data_type {
                DT_AGENT_HEARTBEAT => match update_agent_heartbeat(record, batch, conn) {
                    Ok(detail) => {
                        self.metrics.observe_heartbeat(&batch.agent_id, "agent", &detail);
                    }
                    Err(e) => {
                        tracing::warn!(agent_id = %batch.agent_id, error = ?e, "agent heartbeat skipped");
                    }
                },
                DT_PLUGIN_HEARTBEAT => match update_plugin_heartbeat(record, conn) {
                    Ok((name, detail)) => {
                        self.metrics.observe_heartbeat(&batch.agent_id, &name, &detail);
                    }
                    Err(e) => {
                        tracing::warn!(agent_id = %batch.agent_id, error = ?e, "plugin heartbeat skipped");
                    }
                },
                DT_TASK_RESULT | DT_TASK_STATUS | DT_TASK_ASSET => {
                    match decode_fields(&record.body) {
                        Ok(fields) => {
                            // Best-effort: a rejection is logged, never retried.
                            if let Err(e) = self.tasks.submit(fields).await {
                                tracing::error!(agent_id = %batch.agent_id, error = ?e, "task forward error");
                            }
                        }
                        Err(e) => {
                            tracing::warn!(agent_id = %batch.agent_id, error = ?e, "task record skipped");
                        }
                    }
                }
                DT_AGENT_ERROR_LOG | DT_PLUGIN_ERROR_LOG => {
                    match decode_fields(&record.body) {
                        Ok(fields) => {
                            // Persist first; the log line below is independent.
                            if let Err(e) = self.logs.persist(&batch.agent_id, &fields).await {
                                tracing::error!(agent_id = %batch.agent_id, error = ?e, "error log persist failed");
                            }
                            if let Ok(line) = serde_json::to_string(&fields) {
                                tracing::info!(agent_id = %batch.agent_id, log = %line, "agent error log");
                            }
                        }
                        Err(e) => {
                            tracing::warn!(agent_id = %batch.agent_id, error = ?e, "error log record skipped");
                        }
                    }
                }
                _ => {}
            }

            // Republish outbound, always — whatever the branch outcome.
            let mut msg = self.pool.acquire();
            fill_outbound(&mut msg, record, batch, &scope);
            if let Err(e) = self.bus.publish(&batch.agent_id, &msg).await {
                tracing::error!(agent_id = %batch.agent_id, error = ?e, "outbound publish error");
            }
            self.pool.release(msg);
        }

        batch.agent_id.clone()
    }
}
