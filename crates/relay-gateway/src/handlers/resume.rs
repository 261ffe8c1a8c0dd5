//! Resume handler (op 5)

use super::HandlerResult;
use crate::protocol::{CloseCode, GatewayMessage, ResumePayload};
use crate::registry::{Connection, JoinOutcome};
use crate::server::GatewayState;
use relay_core::value_objects::RoomName;
use std::sync::Arc;

/// Handles Resume messages
///
/// A reconnecting client states the room it was in and the highest id it
/// actually received. Everything after that id is replayed to this
/// session only, and the session is registered for live broadcast only
/// after the replay has been queued - both run on the session's own
/// task, which keeps delivery in strict ascending-id order across the
/// resume boundary.
pub struct ResumeHandler;

impl ResumeHandler {
    /// Handle a Resume message
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: ResumePayload,
    ) -> HandlerResult<Option<CloseCode>> {
        let Ok(room) = RoomName::new(payload.room) else {
            tracing::debug!(
                session_id = %connection.session_id(),
                "Resume with blank room name ignored"
            );
            return Ok(None);
        };

        let lines = match state.recovery().since(&room, payload.since).await {
            Ok(lines) => lines,
            Err(e) => {
                // Recovery abandoned for this attempt, including the live
                // join: the client's next resume re-requests everything
                // after the last id it actually received
                tracing::error!(
                    session_id = %connection.session_id(),
                    room = %room,
                    since = %payload.since,
                    error = %e,
                    "Resume replay failed, recovery abandoned"
                );
                return Ok(None);
            }
        };

        let replayed = lines.len();
        for line in lines {
            if connection
                .send(GatewayMessage::chat_event(line.text, line.id))
                .await
                .is_err()
            {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    "Connection closed during resume replay"
                );
                return Ok(None);
            }
        }

        let outcome = state.registry().join(connection.session_id(), &room).await;

        match outcome {
            JoinOutcome::Joined | JoinOutcome::AlreadyMember => {
                tracing::info!(
                    session_id = %connection.session_id(),
                    room = %room,
                    since = %payload.since,
                    replayed = replayed,
                    "Session resumed"
                );
            }
            JoinOutcome::InAnotherRoom | JoinOutcome::UnknownSession => {
                tracing::warn!(
                    session_id = %connection.session_id(),
                    room = %room,
                    outcome = ?outcome,
                    "Resume replayed but live registration was refused"
                );
            }
        }

        Ok(None)
    }
}
