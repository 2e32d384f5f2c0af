//! Type-state builder for [`SocketClient`].
//!
//! The endpoint is the one required field and the type parameter
//! enforces it at compile time: `build()` only exists on a builder that
//! has seen `endpoint()`.

use super::client::SocketClient;
use super::config::{ClientConfig, DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_INTERVAL};
use crate::traits::*;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Builder type states
pub mod states {
    /// Endpoint not yet provided
    pub struct NoEndpoint;
    /// Endpoint provided; `build()` is available
    pub struct HasEndpoint;
}

use states::*;

pub struct SocketClientBuilder<E> {
    _endpoint_state: PhantomData<E>,
    endpoint: Option<String>,
    reconnect_interval: Duration,
    max_reconnect_attempts: usize,
    retry: Option<Box<dyn RetryPolicy>>,
    transport: Option<Arc<dyn Transport>>,
}

impl SocketClientBuilder<NoEndpoint> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            _endpoint_state: PhantomData,
            endpoint: None,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            retry: None,
            transport: None,
        }
    }

    /// Set the WebSocket endpoint (ws:// or wss://)
    pub fn endpoint(self, endpoint: impl Into<String>) -> SocketClientBuilder<HasEndpoint> {
        SocketClientBuilder {
            _endpoint_state: PhantomData,
            endpoint: Some(endpoint.into()),
            reconnect_interval: self.reconnect_interval,
            max_reconnect_attempts: self.max_reconnect_attempts,
            retry: self.retry,
            transport: self.transport,
        }
    }
}

impl Default for SocketClientBuilder<NoEndpoint> {
    fn default() -> Self {
        Self::new()
    }
}

// Optional configuration methods, available in every state
impl<E> SocketClientBuilder<E> {
    /// Delay between reconnection attempts (default 3 s)
    pub fn reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    /// Reconnection attempt budget (default 5)
    pub fn max_reconnect_attempts(mut self, attempts: usize) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }

    /// Replace the fixed-interval schedule with a custom policy.
    ///
    /// When a policy is set it owns the reconnection schedule entirely;
    /// the interval and budget knobs above no longer apply.
    pub fn retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry = Some(Box::new(policy));
        self
    }

    /// Inject a transport; defaults to [`WsTransport`]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

// Build method - only available once the endpoint is set
impl SocketClientBuilder<HasEndpoint> {
    pub fn build(self) -> Result<SocketClient> {
        let endpoint = self.endpoint.expect("endpoint is set in this state");
        let mut config = ClientConfig::new(endpoint)?;
        config.reconnect_interval = self.reconnect_interval;
        config.max_reconnect_attempts = self.max_reconnect_attempts;

        let retry = self.retry.unwrap_or_else(|| {
            Box::new(FixedInterval::new(
                self.reconnect_interval,
                Some(self.max_reconnect_attempts),
            ))
        });
        let transport = self.transport.unwrap_or_else(|| Arc::new(WsTransport));

        Ok(SocketClient::new(config, retry, transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connection_state::ConnectionState;

    #[test]
    fn builds_with_defaults() {
        let client = SocketClientBuilder::new()
            .endpoint("ws://localhost:8000/ws/community/general")
            .build()
            .unwrap();
        assert_eq!(client.connection_state(), ConnectionState::Idle);
        assert_eq!(client.reconnect_attempts(), 0);
    }

    #[test]
    fn rejects_invalid_endpoint_at_build() {
        let err = SocketClientBuilder::new()
            .endpoint("http://localhost:8000")
            .reconnect_interval(Duration::from_millis(10))
            .build()
            .unwrap_err();
        assert!(matches!(err, SocketError::InvalidEndpoint(_)));
    }
}
