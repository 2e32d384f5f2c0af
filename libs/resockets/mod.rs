//! # Resockets
//!
//! A reconnecting WebSocket client with a typed event-listener registry.
//!
//! The client owns at most one live connection at a time, surfaces
//! `open`, `message`, `close` and `error` events to registered
//! listeners, and retries dropped connections on a bounded schedule
//! until the caller closes it or the attempt budget runs out.
//!
//! The transport sits behind a trait so the reconnection logic is
//! testable without a network; [`WsTransport`] is the production
//! implementation over `tokio-tungstenite`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use resockets::{EventKind, SocketEvent};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> resockets::Result<()> {
//!     let client = resockets::builder()
//!         .endpoint("wss://chat.example.com/ws/community/general")
//!         .reconnect_interval(Duration::from_secs(3))
//!         .max_reconnect_attempts(5)
//!         .build()?;
//!
//!     client.on(EventKind::Message, |event| {
//!         if let SocketEvent::Message(body) = event {
//!             println!("frame: {body}");
//!         }
//!     });
//!
//!     client.connect();
//!     client.send(&serde_json::json!({
//!         "type": "message",
//!         "data": { "content": "hello" },
//!     })).await?;
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

pub mod traits;
pub mod core;

// Re-export all traits
pub use traits::*;

// Re-export core client functionality
pub use core::{
    builder, client, config, connection_state, events,
    builder::SocketClientBuilder,
    client::SocketClient,
    config::ClientConfig,
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState, MetricsSnapshot},
    events::{EventKind, ListenerId, SocketEvent},
};

/// Type alias for Result with SocketError
pub type Result<T> = std::result::Result<T, traits::SocketError>;
