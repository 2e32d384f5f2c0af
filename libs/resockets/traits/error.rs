use thiserror::Error;

/// Main error type for resockets
#[derive(Error, Debug)]
pub enum SocketError {
    /// Endpoint could not be parsed, or has a non-WebSocket scheme.
    /// This is the only error raised at construction time.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport-level failure (establishment or IO). Recoverable:
    /// drives the reconnection loop, surfaced through the event
    /// interface rather than returned to callers.
    #[error("transport error: {0}")]
    Transport(String),

    /// Outbound payload could not be serialized to JSON
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Connection closed
    #[error("connection closed: {0}")]
    Closed(String),
}

/// Result type for resockets operations
pub type Result<T> = std::result::Result<T, SocketError>;
