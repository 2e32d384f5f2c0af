use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Decode failure for an inbound frame.
///
/// The backend may grow new frame types; an unknown discriminator lands
/// here so callers can drop-and-log without tearing anything down.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A chat message broadcast to a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    /// Naive ISO-8601; the backend emits no timezone suffix
    pub timestamp: NaiveDateTime,
    pub avatar: String,
}

/// A message delivered directly between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub username: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
    pub avatar: String,
}

/// Typing-indicator state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingNotice {
    pub user_id: String,
    pub username: String,
    pub channel_id: String,
    pub is_typing: bool,
}

/// A user joining or leaving a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceChange {
    pub user_id: String,
    pub username: String,
    pub channel_id: String,
    pub timestamp: NaiveDateTime,
}

/// Frames the backend pushes to connected clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerFrame {
    Message(ChatMessage),
    DirectMessage(DirectMessage),
    Typing(TypingNotice),
    UserJoined(PresenceChange),
    UserLeft(PresenceChange),
    Error(String),
}

impl ServerFrame {
    /// Decode a frame body the socket client already parsed into JSON
    pub fn from_value(value: serde_json::Value) -> Result<Self, FrameError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl FromStr for ServerFrame {
    type Err = FrameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Frames clients send to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    Message { content: String },
    DirectMessage { content: String },
    Typing { is_typing: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_channel_message_frame() {
        // shape as the backend broadcasts it
        let raw = json!({
            "type": "message",
            "data": {
                "id": "5f7f4c2e-4e9a-4c7d-9f3d-2d7c1b8a0e11",
                "channel_id": "general",
                "user_id": "42",
                "username": "ada",
                "content": "hello world",
                "timestamp": "2024-05-14T09:30:00.123456",
                "avatar": "https://example.com/default_avatar.png"
            }
        });

        let frame = ServerFrame::from_value(raw).unwrap();
        match frame {
            ServerFrame::Message(msg) => {
                assert_eq!(msg.channel_id, "general");
                assert_eq!(msg.username, "ada");
                assert_eq!(msg.content, "hello world");
                assert_eq!(msg.timestamp.format("%Y").to_string(), "2024");
            }
            other => panic!("expected message frame, got {other:?}"),
        }
    }

    #[test]
    fn decodes_presence_and_typing_frames() {
        let joined: ServerFrame = r#"{
            "type": "user_joined",
            "data": {
                "user_id": "42",
                "username": "ada",
                "channel_id": "general",
                "timestamp": "2024-05-14T09:30:00"
            }
        }"#
        .parse()
        .unwrap();
        assert!(matches!(joined, ServerFrame::UserJoined(_)));

        let typing: ServerFrame = r#"{
            "type": "typing",
            "data": {
                "user_id": "42",
                "username": "ada",
                "channel_id": "general",
                "is_typing": true
            }
        }"#
        .parse()
        .unwrap();
        match typing {
            ServerFrame::Typing(notice) => assert!(notice.is_typing),
            other => panic!("expected typing frame, got {other:?}"),
        }
    }

    #[test]
    fn decodes_error_frame_with_string_payload() {
        let frame: ServerFrame = r#"{"type":"error","data":"Failed to save message"}"#
            .parse()
            .unwrap();
        assert_eq!(frame, ServerFrame::Error("Failed to save message".into()));
    }

    #[test]
    fn unknown_discriminator_is_a_typed_error() {
        let err = r#"{"type":"presence_sync","data":{}}"#
            .parse::<ServerFrame>()
            .unwrap_err();
        assert!(matches!(err, FrameError::Malformed(_)));
    }

    #[test]
    fn encodes_client_frames_with_type_and_data() {
        let frame = ClientFrame::Message {
            content: "hi".into(),
        };
        assert_eq!(
            serde_json::to_string(&frame).unwrap(),
            r#"{"type":"message","data":{"content":"hi"}}"#
        );

        let typing = ClientFrame::Typing { is_typing: true };
        assert_eq!(
            serde_json::to_string(&typing).unwrap(),
            r#"{"type":"typing","data":{"is_typing":true}}"#
        );
    }
}
