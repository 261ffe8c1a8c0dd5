//! Protocol payload definitions
//!
//! Defines the data structures carried in the `d` field for each op code.

use relay_core::value_objects::MessageId;
use serde::{Deserialize, Serialize};

// === Client Payloads ===

/// JoinRoom payload (op 2)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    /// Raw room name; blank names are dropped silently at the handler
    pub room: String,
}

/// LeaveRoom payload (op 3)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRoomPayload {
    pub room: String,
}

/// ChatMessage payload from the client (op 4)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub content: String,

    /// Deduplication token for idempotent retries. When absent the
    /// session derives `<connection-id>-<counter>` itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_offset: Option<String>,
}

/// Resume payload (op 5)
///
/// The transport-level "this is a resumed session" signal: sent instead
/// of JoinRoom by a client that reconnects with prior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePayload {
    pub room: String,

    /// Highest message id the client actually received
    #[serde(default)]
    pub since: MessageId,
}

// === Server Payloads ===

/// Username payload (op 10), sent once immediately after connect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernamePayload {
    pub username: String,
}

/// ChatMessage payload from the server (op 4)
///
/// One per delivered or recovered message; `id` is what the client
/// records as its resume offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEventPayload {
    /// Formatted line: `"<username>: <content>"`
    pub message: String,
    pub id: MessageId,
}
