//! Message entity - one durably stored chat message

use crate::value_objects::{MessageId, RoomName};

/// Message entity
///
/// Created on a successful Message Store append; never mutated, never
/// deleted. `client_offset` is unique store-wide and is what makes retries
/// of the same logical send idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub room: RoomName,
    pub username: String,
    pub content: String,
    pub client_offset: String,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: MessageId,
        room: RoomName,
        username: String,
        content: String,
        client_offset: String,
    ) -> Self {
        Self {
            id,
            room,
            username,
            content,
            client_offset,
        }
    }

    /// The outbound wire shape: `"<username>: <content>"`
    pub fn formatted(&self) -> String {
        format!("{}: {}", self.username, self.content)
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
