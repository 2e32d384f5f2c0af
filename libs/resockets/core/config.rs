use crate::traits::error::{Result, SocketError};
use std::time::Duration;
use url::Url;

/// Default delay between reconnection attempts
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(3000);

/// Default reconnection attempt budget
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: usize = 5;

/// Immutable connection configuration, fixed at construction.
///
/// The endpoint is validated when the config is built; everything that
/// can go wrong later is reported through the event interface instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub(crate) endpoint: Url,
    pub(crate) reconnect_interval: Duration,
    pub(crate) max_reconnect_attempts: usize,
}

impl ClientConfig {
    /// Validate `endpoint` and build a config with the default retry
    /// settings.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint.as_ref())?;
        Ok(Self {
            endpoint,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
        })
    }

    /// Remote endpoint this client dials
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Delay between reconnection attempts
    pub fn reconnect_interval(&self) -> Duration {
        self.reconnect_interval
    }

    /// Reconnection attempt budget
    pub fn max_reconnect_attempts(&self) -> usize {
        self.max_reconnect_attempts
    }
}

/// Parse and validate a WebSocket endpoint.
pub(crate) fn parse_endpoint(raw: &str) -> Result<Url> {
    let url =
        Url::parse(raw).map_err(|e| SocketError::InvalidEndpoint(format!("{raw}: {e}")))?;
    match url.scheme() {
        "ws" | "wss" => Ok(url),
        other => Err(SocketError::InvalidEndpoint(format!(
            "unsupported scheme '{other}' in {raw}"
        ))),
    }
}
