//! Delivery engine
//!
//! Accepts an incoming message, persists it through the Message Store,
//! and fans the formatted line out to every live member of the room.

use std::sync::Arc;

use relay_core::traits::{MessageStore, RoomBroadcaster};
use relay_core::value_objects::{MessageId, RoomName};
use relay_core::DomainError;
use tracing::{debug, info, instrument, trace};

use super::error::{ServiceError, ServiceResult};

/// Maximum accepted content length, in bytes
const MAX_CONTENT_LEN: usize = 2000;

/// Delivery engine
///
/// Ordering truth is the store's id assignment; the broadcaster port is
/// the seam a multi-process deployment replaces with cross-process
/// fan-out.
pub struct DeliveryService {
    store: Arc<dyn MessageStore>,
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl DeliveryService {
    /// Create a new DeliveryService
    pub fn new(store: Arc<dyn MessageStore>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// Persist and broadcast one message
    ///
    /// `room` is the sender's current room, `None` when the session never
    /// joined one - in which case the send is rejected before any side
    /// effect. A deduplicated append (retried client offset) resolves to
    /// the original id and is NOT re-broadcast.
    #[instrument(skip(self, content), fields(offset = %client_offset))]
    pub async fn send(
        &self,
        room: Option<&RoomName>,
        username: &str,
        content: &str,
        client_offset: &str,
    ) -> ServiceResult<MessageId> {
        let room = room.ok_or(ServiceError::NotInRoom)?;

        if content.len() > MAX_CONTENT_LEN {
            return Err(DomainError::ContentTooLong {
                max: MAX_CONTENT_LEN,
            }
            .into());
        }

        let outcome = self
            .store
            .append(room, username, content, client_offset)
            .await?;

        if outcome.deduplicated {
            debug!(
                room = %room,
                message_id = %outcome.message.id,
                "Retried send resolved to existing message, skipping broadcast"
            );
            return Ok(outcome.message.id);
        }

        info!(
            room = %room,
            message_id = %outcome.message.id,
            username = %username,
            "Message persisted"
        );

        let line = outcome.message.formatted();
        self.broadcaster
            .broadcast_to_room(room, &line, outcome.message.id)
            .await;

        trace!(room = %room, message_id = %outcome.message.id, "Message broadcast");

        Ok(outcome.message.id)
    }
}
