//! ChatMessage handler (op 4)

use super::HandlerResult;
use crate::protocol::{ChatMessagePayload, CloseCode};
use crate::registry::Connection;
use crate::server::GatewayState;
use relay_service::ServiceError;
use std::sync::Arc;

/// Handles client ChatMessage sends
///
/// Every failure path drops the message without a reply: the server
/// never tells a misbehaving client why nothing was delivered. A
/// transient store failure is safe for the client to retry with the
/// same offset.
pub struct ChatHandler;

impl ChatHandler {
    /// Handle a ChatMessage from the client
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: ChatMessagePayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let room = connection.room().await;

        // Client-supplied offset when present (retry safety across
        // reconnects), session-derived otherwise
        let client_offset = payload
            .client_offset
            .unwrap_or_else(|| connection.next_offset());

        let result = state
            .delivery()
            .send(
                room.as_ref(),
                connection.username(),
                &payload.content,
                &client_offset,
            )
            .await;

        match result {
            Ok(id) => {
                tracing::trace!(
                    session_id = %connection.session_id(),
                    message_id = %id,
                    "Chat message delivered"
                );
            }
            Err(ServiceError::NotInRoom) => {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    username = %connection.username(),
                    "Chat message dropped: session has not joined a room"
                );
            }
            Err(e) if e.is_retryable() => {
                tracing::warn!(
                    session_id = %connection.session_id(),
                    client_offset = %client_offset,
                    error = %e,
                    "Chat message dropped: store unavailable (client may retry)"
                );
            }
            Err(e) => {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    error = %e,
                    "Chat message dropped"
                );
            }
        }

        Ok(None)
    }
}
