//! Individual WebSocket connection
//!
//! Represents a single live session and its state.

use crate::protocol::GatewayMessage;
use relay_core::value_objects::RoomName;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// A single live session
///
/// The display name is assigned once at connect and never changes. The
/// current room is owned by the registry - handlers read it, only the
/// registry writes it. The send counter backs offset derivation for
/// clients that do not supply their own deduplication token.
pub struct Connection {
    /// Unique session ID (opaque, assigned at upgrade)
    session_id: String,

    /// Display name, immutable for the session's lifetime
    username: String,

    /// Current room (None until a join is accepted)
    room: RwLock<Option<RoomName>>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Per-session strictly increasing counter for derived client offsets
    send_counter: AtomicU64,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        session_id: String,
        username: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            username,
            room: RwLock::new(None),
            sender,
            send_counter: AtomicU64::new(0),
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the display name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the current room
    pub async fn room(&self) -> Option<RoomName> {
        self.room.read().await.clone()
    }

    /// Set the current room (registry only)
    pub(crate) async fn set_room(&self, room: RoomName) {
        *self.room.write().await = Some(room);
    }

    /// Clear the current room, returning what it was (registry only)
    pub(crate) async fn take_room(&self) -> Option<RoomName> {
        self.room.write().await.take()
    }

    /// Derive the next client offset for this session:
    /// `<connection-id>-<counter>`
    ///
    /// Strictly increasing per session, so every logical send maps to a
    /// distinct token while retries of one send reuse the client's own.
    pub fn next_offset(&self) -> String {
        let n = self.send_counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.session_id, n)
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: GatewayMessage,
    ) -> Result<(), mpsc::error::SendError<GatewayMessage>> {
        self.sender.send(message).await
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("username", &self.username)
            .finish()
    }
}
