//! Client core: configuration, connection state, the listener registry
//! and the connection driver.

pub mod builder;
pub mod client;
pub mod config;
pub mod connection_state;
pub mod events;

// Re-export main types
pub use builder::SocketClientBuilder;
pub use client::SocketClient;
pub use config::ClientConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState, MetricsSnapshot};
pub use events::{EventKind, ListenerId, SocketEvent};

// Re-export traits for convenience
pub use crate::traits::*;

/// Create a new socket client builder.
///
/// This is a convenience function for starting the builder pattern.
///
/// # Example
/// ```ignore
/// let client = resockets::builder()
///     .endpoint("wss://chat.example.com/ws/community/general")
///     .max_reconnect_attempts(3)
///     .build()?;
/// ```
pub fn builder() -> SocketClientBuilder<builder::states::NoEndpoint> {
    SocketClientBuilder::new()
}
