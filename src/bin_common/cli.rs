//! CLI utilities for binaries: config discovery and logging setup.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the tap config location
pub const TAP_CONFIG_ENV: &str = "TAP_CONFIG_PATH";

/// Default tap config location
pub const TAP_CONFIG_DEFAULT: &str = "config/tap_config.yaml";

/// Resolve the config file path from the environment, falling back to
/// the default location.
pub fn config_path_from_env() -> PathBuf {
    std::env::var(TAP_CONFIG_ENV)
        .unwrap_or_else(|_| TAP_CONFIG_DEFAULT.to_string())
        .into()
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
