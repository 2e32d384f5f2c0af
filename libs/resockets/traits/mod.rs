//! Core traits and types for the resockets client library.
//!
//! - **Transport**: the pluggable connection boundary — the only place
//!   the crate touches a real network
//! - **RetryPolicy**: reconnection scheduling
//! - **SocketError**: error taxonomy

pub mod error;
pub mod retry;
pub mod transport;

// Re-export commonly used types
pub use error::{Result, SocketError};
pub use retry::{ExponentialBackoff, FixedInterval, NoRetry, RetryPolicy};
pub use transport::{
    CloseInfo, Transport, TransportEvent, TransportSink, TransportStream, WsTransport,
};
