//! Recovery engine
//!
//! Replays stored messages to one session: full history on a fresh room
//! join, everything after a stated offset on reconnect. Replay output is
//! delivered to the requesting session only - it is never broadcast.

use std::sync::Arc;

use relay_core::traits::MessageStore;
use relay_core::value_objects::{MessageId, RoomName};
use tracing::{debug, instrument};

use super::error::ServiceResult;
use crate::dto::ChatLine;

/// Recovery engine
pub struct RecoveryService {
    store: Arc<dyn MessageStore>,
}

impl RecoveryService {
    /// Create a new RecoveryService
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Full history for a fresh room join, ascending by id
    #[instrument(skip(self))]
    pub async fn history(&self, room: &RoomName) -> ServiceResult<Vec<ChatLine>> {
        let messages = self.store.list(room).await?;

        debug!(room = %room, count = messages.len(), "History replay prepared");

        Ok(messages.iter().map(ChatLine::from).collect())
    }

    /// Messages after `since` for a resuming session, ascending by id
    ///
    /// The caller delivers these before registering the session for live
    /// broadcast; that sequencing is what keeps per-session delivery in
    /// strict ascending-id order across the resume boundary.
    #[instrument(skip(self))]
    pub async fn since(&self, room: &RoomName, since: MessageId) -> ServiceResult<Vec<ChatLine>> {
        if since.is_zero() {
            return self.history(room).await;
        }

        let messages = self.store.list_after(room, since).await?;

        debug!(
            room = %room,
            since = %since,
            count = messages.len(),
            "Resume replay prepared"
        );

        Ok(messages.iter().map(ChatLine::from).collect())
    }
}
