use serde::Deserialize;

// ═══════════════════════════════════════════════════════════════
//  Dispatch Config
// ═══════════════════════════════════════════════════════════════

fn default_pool_capacity() -> usize {
    1024
}

fn default_heartbeat_gauges() -> Vec<String> {
    ["cpu", "rss", "du", "read_speed", "write_speed", "tx_speed", "rx_speed"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Dispatcher tuning knobs. All fields default, so an empty config
/// section is valid.
#[derive(Debug, Deserialize)]
pub struct DispatchConfig {
    /// Max idle outbound messages kept in the reuse pool.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
    /// Heartbeat detail keys projected onto gauges. Each key becomes a
    /// gauge labeled {agent_id, name}.
    #[serde(default = "default_heartbeat_gauges")]
    pub heartbeat_gauges: Vec<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pool_capacity: default_pool_capacity(),
            heartbeat_gauges: default_heartbeat_gauges(),
        }
    }
}
