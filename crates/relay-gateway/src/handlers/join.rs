//! JoinRoom handler (op 2)

use super::HandlerResult;
use crate::protocol::{CloseCode, GatewayMessage, JoinRoomPayload};
use crate::registry::{Connection, JoinOutcome};
use crate::server::GatewayState;
use relay_core::value_objects::RoomName;
use std::sync::Arc;

/// Handles JoinRoom messages
///
/// History is replayed to the joining session before it is registered as
/// a live member, so the session's event stream stays in ascending-id
/// order. Messages persisted while the history query runs are not
/// delivered live - the session was not yet a member at broadcast time,
/// which is exactly the delivery guarantee's cut-off.
pub struct JoinHandler;

impl JoinHandler {
    /// Handle a JoinRoom message
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: JoinRoomPayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Ok(room) = RoomName::new(payload.room) else {
            // Blank room: dropped with no membership change and no reply
            tracing::debug!(
                session_id = %connection.session_id(),
                "Join with blank room name ignored"
            );
            return Ok(None);
        };

        // Membership can only move through an explicit leave. Only this
        // session's own task mutates its room, so the check holds through
        // the replay below.
        match connection.room().await {
            Some(current) if current == room => {
                // Idempotent re-join: replay history again, as a fresh
                // join would
            }
            Some(current) => {
                tracing::warn!(
                    session_id = %connection.session_id(),
                    current_room = %current,
                    requested_room = %room,
                    "Join refused: session is already in a room"
                );
                return Ok(None);
            }
            None => {}
        }

        match state.recovery().history(&room).await {
            Ok(lines) => {
                let count = lines.len();
                for line in lines {
                    if connection
                        .send(GatewayMessage::chat_event(line.text, line.id))
                        .await
                        .is_err()
                    {
                        tracing::debug!(
                            session_id = %connection.session_id(),
                            "Connection closed during history replay"
                        );
                        return Ok(None);
                    }
                }

                tracing::debug!(
                    session_id = %connection.session_id(),
                    room = %room,
                    count = count,
                    "History replayed"
                );
            }
            Err(e) => {
                // Best-effort history: the join still goes through and
                // live delivery starts; the gap is recoverable on a
                // future reconnect
                tracing::error!(
                    session_id = %connection.session_id(),
                    room = %room,
                    error = %e,
                    "History replay failed"
                );
            }
        }

        let outcome = state.registry().join(connection.session_id(), &room).await;

        if matches!(outcome, JoinOutcome::Joined) {
            tracing::info!(
                session_id = %connection.session_id(),
                username = %connection.username(),
                room = %room,
                "Session joined room"
            );
        }

        Ok(None)
    }
}
