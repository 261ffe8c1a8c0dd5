//! Room registry
//!
//! Manages all active connections and their room memberships using
//! DashMap for thread-safe access. No guard is held across an await of
//! the store - broadcast snapshots the member set first.

use super::Connection;
use crate::protocol::GatewayMessage;
use async_trait::async_trait;
use dashmap::DashMap;
use relay_core::traits::RoomBroadcaster;
use relay_core::value_objects::{MessageId, RoomName};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of a join attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Session registered as a live member
    Joined,
    /// Session was already a member of this room (idempotent no-op)
    AlreadyMember,
    /// Session belongs to a different room; an explicit leave is
    /// required first
    InAnotherRoom,
    /// No such session
    UnknownSession,
}

/// Manages all active connections and room membership
pub struct RoomRegistry {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// Room name to member session IDs mapping
    rooms: DashMap<RoomName, HashSet<String>>,
}

impl RoomRegistry {
    /// Create a new room registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new room registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        username: String,
        sender: mpsc::Sender<GatewayMessage>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), username, sender);
        self.connections
            .insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Register a session as a live member of a room
    ///
    /// A session already in a different room is refused - membership is
    /// released only by an explicit leave or by disconnect.
    pub async fn join(&self, session_id: &str, room: &RoomName) -> JoinOutcome {
        let Some(connection) = self.get_connection(session_id) else {
            return JoinOutcome::UnknownSession;
        };

        match connection.room().await {
            Some(current) if &current == room => return JoinOutcome::AlreadyMember,
            Some(current) => {
                tracing::warn!(
                    session_id = %session_id,
                    current_room = %current,
                    requested_room = %room,
                    "Join refused: session must leave its room first"
                );
                return JoinOutcome::InAnotherRoom;
            }
            None => {}
        }

        connection.set_room(room.clone()).await;
        self.rooms
            .entry(room.clone())
            .or_default()
            .insert(session_id.to_string());

        tracing::debug!(session_id = %session_id, room = %room, "Session joined room");

        JoinOutcome::Joined
    }

    /// Remove a session from a room's live member set
    ///
    /// No-op if the session is not a member of that room.
    pub async fn leave(&self, session_id: &str, room: &RoomName) {
        let Some(connection) = self.get_connection(session_id) else {
            return;
        };

        if connection.room().await.as_ref() != Some(room) {
            return;
        }

        connection.take_room().await;

        // Atomically modify the member set, then drop empty rooms
        self.rooms.alter(room, |_, mut members| {
            members.remove(session_id);
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());

        tracing::debug!(session_id = %session_id, room = %room, "Session left room");
    }

    /// Remove a session from whatever room it occupies and drop the
    /// connection (cleanup on connection loss); never errors
    pub async fn disconnect(&self, session_id: &str) {
        if let Some((_, connection)) = self.connections.remove(session_id) {
            if let Some(room) = connection.take_room().await {
                self.rooms.alter(&room, |_, mut members| {
                    members.remove(session_id);
                    members
                });
                self.rooms.retain(|_, members| !members.is_empty());
            }

            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Snapshot of the live member session IDs of a room
    pub fn members_of(&self, room: &RoomName) -> Vec<String> {
        self.rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Send a message to every live member of a room
    pub async fn send_to_room(&self, room: &RoomName, message: GatewayMessage) -> usize {
        // Snapshot first so no map guard is held across sends
        let members = self.members_of(room);
        let mut sent = 0;

        for session_id in members {
            if let Some(connection) = self.get_connection(&session_id) {
                if connection.send(message.clone()).await.is_ok() {
                    sent += 1;
                }
            }
        }

        tracing::trace!(room = %room, sent = sent, "Message sent to room members");

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of rooms with live members
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomBroadcaster for RoomRegistry {
    async fn broadcast_to_room(&self, room: &RoomName, text: &str, id: MessageId) {
        self.send_to_room(room, GatewayMessage::chat_event(text, id))
            .await;
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
