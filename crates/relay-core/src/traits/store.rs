//! Store and broadcast ports
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. `MessageStore` is the single source of
//! ordering truth; `RoomBroadcaster` is the fan-out seam a multi-process
//! deployment can satisfy with a cross-process mechanism.

use async_trait::async_trait;

use crate::entities::Message;
use crate::error::DomainError;
use crate::value_objects::{MessageId, RoomName};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Result of an `append` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The surviving row: freshly inserted, or the earlier row that
    /// already carried this client offset
    pub message: Message,
    /// True when the offset had been appended before; duplicates must not
    /// be re-broadcast
    pub deduplicated: bool,
}

/// Durable, append-only log of chat messages per room
///
/// Idempotency is enforced by the store itself through the uniqueness of
/// `client_offset` - never by application-level check-then-insert, which
/// would race under concurrent retries of the same logical send.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert a message; a repeated client offset resolves to the
    /// existing row without creating a duplicate
    async fn append(
        &self,
        room: &RoomName,
        username: &str,
        content: &str,
        client_offset: &str,
    ) -> RepoResult<AppendOutcome>;

    /// Full history for a room, ascending by id
    async fn list(&self, room: &RoomName) -> RepoResult<Vec<Message>>;

    /// Messages with id > `since` for a room, ascending by id
    async fn list_after(&self, room: &RoomName, since: MessageId) -> RepoResult<Vec<Message>>;
}

/// Live fan-out to every session currently registered in a room
///
/// The in-process implementation walks the Room Membership Registry; a
/// horizontally scaled deployment substitutes a cross-process fan-out
/// behind the same call without touching the Delivery Engine.
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// Deliver `text` + `id` to every live member of `room`, sender included
    async fn broadcast_to_room(&self, room: &RoomName, text: &str, id: MessageId);
}
