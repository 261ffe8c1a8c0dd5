//! Gateway message format
//!
//! Defines the envelope for all WebSocket messages.

use super::{
    ChatEventPayload, ChatMessagePayload, CloseCode, JoinRoomPayload, LeaveRoomPayload, OpCode,
    ResumePayload, UsernamePayload,
};
use relay_core::value_objects::MessageId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
///
/// All messages sent over the WebSocket connection follow this format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Payload data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Username message (op 10)
    #[must_use]
    pub fn username(username: impl Into<String>) -> Self {
        let payload = UsernamePayload {
            username: username.into(),
        };
        Self {
            op: OpCode::Username,
            d: serde_json::to_value(payload).ok(),
        }
    }

    /// Create a server ChatMessage event (op 4)
    #[must_use]
    pub fn chat_event(message: impl Into<String>, id: MessageId) -> Self {
        let payload = ChatEventPayload {
            message: message.into(),
            id,
        };
        Self {
            op: OpCode::ChatMessage,
            d: serde_json::to_value(payload).ok(),
        }
    }

    // === Parsing Client Messages ===

    /// Try to parse as a JoinRoom payload (op 2)
    pub fn as_join_room(&self) -> Option<JoinRoomPayload> {
        if self.op != OpCode::JoinRoom {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a LeaveRoom payload (op 3)
    pub fn as_leave_room(&self) -> Option<LeaveRoomPayload> {
        if self.op != OpCode::LeaveRoom {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a client ChatMessage payload (op 4)
    pub fn as_chat_message(&self) -> Option<ChatMessagePayload> {
        if self.op != OpCode::ChatMessage {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Try to parse as a Resume payload (op 5)
    pub fn as_resume(&self) -> Option<ResumePayload> {
        if self.op != OpCode::Resume {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Check if this is a valid client message
    #[must_use]
    pub fn is_valid_client_message(&self) -> bool {
        self.op.is_client_op()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create an error close frame
    #[must_use]
    pub fn close_frame(code: CloseCode) -> (u16, String) {
        (code.as_u16(), code.description().to_string())
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GatewayMessage(op={})", self.op)
    }
}
