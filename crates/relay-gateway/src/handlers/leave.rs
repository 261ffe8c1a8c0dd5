//! LeaveRoom handler (op 3)

use super::HandlerResult;
use crate::protocol::{CloseCode, LeaveRoomPayload};
use crate::registry::Connection;
use crate::server::GatewayState;
use relay_core::value_objects::RoomName;
use std::sync::Arc;

/// Handles LeaveRoom messages
pub struct LeaveHandler;

impl LeaveHandler {
    /// Handle a LeaveRoom message
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: LeaveRoomPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Ok(room) = RoomName::new(payload.room) else {
            tracing::debug!(
                session_id = %connection.session_id(),
                "Leave with blank room name ignored"
            );
            return Ok(None);
        };

        // No-op if the session is not a member of that room
        state.registry().leave(connection.session_id(), &room).await;

        tracing::info!(
            session_id = %connection.session_id(),
            room = %room,
            "Session left room"
        );

        Ok(None)
    }
}
