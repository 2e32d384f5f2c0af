//! # Chatwire
//!
//! Wire protocol for the community chat backend.
//!
//! Every frame on the socket is a JSON object with a `type`
//! discriminator and a `data` payload:
//!
//! ```json
//! {"type": "message", "data": {"content": "hello"}}
//! ```
//!
//! [`ServerFrame`] covers what the backend pushes, [`ClientFrame`] what
//! clients send, and the endpoint helpers build the channel and
//! direct-message socket URLs.

pub mod endpoint;
pub mod frames;

pub use endpoint::{channel_endpoint, direct_endpoint, EndpointError};
pub use frames::{
    ChatMessage, ClientFrame, DirectMessage, FrameError, PresenceChange, ServerFrame,
    TypingNotice,
};
