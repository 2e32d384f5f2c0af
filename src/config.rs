//! Configuration for the diagnostic binaries.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reconnect_interval_ms() -> u64 {
    3000
}

fn default_max_reconnect_attempts() -> usize {
    5
}

/// Settings for the `chat_tap` binary
#[derive(Debug, Clone, Deserialize)]
pub struct TapConfig {
    /// WebSocket base URL of the chat backend (ws:// or wss://)
    pub endpoint: String,
    /// Channel to join
    pub channel_id: String,
    /// Auth token forwarded as a query parameter
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_reconnect_interval_ms")]
    pub reconnect_interval_ms: u64,
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: usize,
}

impl TapConfig {
    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: TapConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn log(&self) {
        tracing::info!("endpoint: {}", self.endpoint);
        tracing::info!("channel: {}", self.channel_id);
        tracing::info!(
            "reconnect: every {}ms, budget {}",
            self.reconnect_interval_ms,
            self.max_reconnect_attempts
        );
    }
}
