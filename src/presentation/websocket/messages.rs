//! WebSocket Message Types
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::dto::MessageDto;
use crate::shared::error::{AppError, FieldError};

/// Client event names
pub mod client_events {
    pub const MESSAGE: &str = "message";
    pub const PING: &str = "ping";
}

/// Incoming gateway frame
#[derive(Debug, Deserialize)]
pub struct GatewayReceive {
    pub event: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Outgoing gateway frame
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Sent once to a session right after it joined its room
    #[serde(rename = "ready")]
    Ready(ReadyPayload),

    /// A direct message involving the session's user
    #[serde(rename = "message")]
    Message(MessagePayload),

    #[serde(rename = "user connected")]
    UserConnected(PresencePayload),

    #[serde(rename = "user disconnected")]
    UserDisconnected(PresencePayload),

    /// A client event was refused; only the emitting session receives it
    #[serde(rename = "error")]
    Error(ErrorPayload),

    #[serde(rename = "pong")]
    Pong,
}

impl ServerEvent {
    /// Get the event name for logging
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerEvent::Ready(_) => "ready",
            ServerEvent::Message(_) => "message",
            ServerEvent::UserConnected(_) => "user connected",
            ServerEvent::UserDisconnected(_) => "user disconnected",
            ServerEvent::Error(_) => "error",
            ServerEvent::Pong => "pong",
        }
    }
}

/// Ready payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyPayload {
    pub user_id: Uuid,
    pub session_id: String,
}

/// Direct message as pushed to sessions. `from` repeats `senderId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePayload {
    #[serde(flatten)]
    pub message: MessageDto,
    pub from: Uuid,
}

impl From<MessageDto> for MessagePayload {
    fn from(message: MessageDto) -> Self {
        Self {
            from: message.sender_id,
            message,
        }
    }
}

/// Presence payload for `user connected` / `user disconnected`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Error payload, shaped like the HTTP error body plus the offending event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub event: String,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorPayload {
    pub fn new(event: impl Into<String>, error: &AppError) -> Self {
        let body = error.to_body();
        Self {
            event: event.into(),
            status: error.status().as_u16(),
            message: body.message,
            errors: body.errors,
        }
    }
}
