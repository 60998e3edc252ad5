use std::collections::HashMap;

use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};

use agent_api::{
    Detail, DT_AGENT_ERROR_LOG, DT_AGENT_HEARTBEAT, DT_PLUGIN_ERROR_LOG, DT_PLUGIN_HEARTBEAT,
    DT_TASK_ASSET, DT_TASK_RESULT, DT_TASK_STATUS,
};

use crate::error::DispatchError;

/// Static label strings for the closed type-code table; only codes
/// outside it pay for label formatting.
fn known_type_label(data_type: i32) -> Option<&'static str> {
    match data_type {
        DT_AGENT_HEARTBEAT => Some("1000"),
        DT_PLUGIN_HEARTBEAT => Some("1001"),
        DT_TASK_RESULT => Some("2001"),
        DT_TASK_STATUS => Some("2003"),
        DT_TASK_ASSET => Some("6003"),
        DT_AGENT_ERROR_LOG => Some("1010"),
        DT_PLUGIN_ERROR_LOG => Some("1011"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════
//  Metrics
// ═══════════════════════════════════════════════════════════════

/// Injected metrics handle over an explicit registry, one per engine
/// instance. Holding the registry here instead of reaching for the
/// process default keeps tests isolated from each other.
///
/// Heartbeat gauges are absolute `set` operations and are never reset
/// between heartbeats: a detail key that disappears in a later
/// heartbeat keeps its last-observed value. That retention is
/// intentional monitoring semantics, not an oversight.
pub struct Metrics {
    registry: Registry,
    heartbeat_gauges: HashMap<String, GaugeVec>,
    data_type_total: IntCounterVec,
    agent_id_total: IntCounterVec,
}

impl Metrics {
    /// Build and register all collectors. `gauge_keys` is the fixed
    /// allow-list of heartbeat detail keys projected onto gauges.
    pub fn new(registry: Registry, gauge_keys: &[String]) -> Result<Self, DispatchError> {
        let mut heartbeat_gauges = HashMap::with_capacity(gauge_keys.len());
        for key in gauge_keys {
            let gauge = GaugeVec::new(
                Opts::new(
                    format!("agent_heartbeat_{key}"),
                    format!("last reported heartbeat value of {key}"),
                ),
                &["agent_id", "name"],
            )?;
            registry.register(Box::new(gauge.clone()))?;
            heartbeat_gauges.insert(key.clone(), gauge);
        }

        let data_type_total = IntCounterVec::new(
            Opts::new("output_data_type_total", "records dispatched, by data type"),
            &["data_type"],
        )?;
        registry.register(Box::new(data_type_total.clone()))?;

        let agent_id_total = IntCounterVec::new(
            Opts::new("output_agent_id_total", "records dispatched, by agent"),
            &["agent_id"],
        )?;
        registry.register(Box::new(agent_id_total.clone()))?;

        Ok(Self {
            registry,
            heartbeat_gauges,
            data_type_total,
            agent_id_total,
        })
    }

    /// Registry this instance registered its collectors with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Bump the per-type and per-agent counters. Called once per
    /// record, regardless of type or parse outcome.
    pub fn count_record(&self, data_type: i32, agent_id: &str) {
        match known_type_label(data_type) {
            Some(label) => self.data_type_total.with_label_values(&[label]).inc(),
            None => {
                let label = data_type.to_string();
                self.data_type_total
                    .with_label_values(&[label.as_str()])
                    .inc();
            }
        }
        self.agent_id_total.with_label_values(&[agent_id]).inc();
    }

    /// Project a heartbeat detail onto the gauge allow-list. `subject`
    /// is "agent" for agent heartbeats and the plugin name otherwise.
    /// Keys absent from `detail` leave their gauges untouched.
    pub fn observe_heartbeat(&self, agent_id: &str, subject: &str, detail: &Detail) {
        for (key, gauge) in &self.heartbeat_gauges {
            if let Some(value) = detail.get(key).and_then(|v| v.as_number()) {
                gauge.with_label_values(&[agent_id, subject]).set(value);
            }
        }
    }
}
