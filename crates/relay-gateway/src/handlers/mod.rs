//! Op code handlers
//!
//! Handles incoming WebSocket messages based on their operation code.

mod chat;
mod error;
mod join;
mod leave;
mod resume;

pub use chat::ChatHandler;
pub use error::{HandlerError, HandlerResult};
pub use join::JoinHandler;
pub use leave::LeaveHandler;
pub use resume::ResumeHandler;

use crate::protocol::{CloseCode, GatewayMessage, OpCode};
use crate::registry::Connection;
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<Option<CloseCode>> {
        // Validate that this is a client-sendable op code
        if !message.op.is_client_op() {
            tracing::warn!(
                session_id = %connection.session_id(),
                op = %message.op,
                "Received server-only op code from client"
            );
            return Ok(Some(CloseCode::UnknownOpcode));
        }

        match message.op {
            OpCode::JoinRoom => {
                let payload = message.as_join_room().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid JoinRoom payload".to_string())
                })?;

                JoinHandler::handle(state, connection, payload).await
            }
            OpCode::LeaveRoom => {
                let payload = message.as_leave_room().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid LeaveRoom payload".to_string())
                })?;

                LeaveHandler::handle(state, connection, payload).await
            }
            OpCode::ChatMessage => {
                let payload = message.as_chat_message().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid ChatMessage payload".to_string())
                })?;

                ChatHandler::handle(state, connection, payload).await
            }
            OpCode::Resume => {
                let payload = message.as_resume().ok_or_else(|| {
                    HandlerError::InvalidPayload("Invalid Resume payload".to_string())
                })?;

                ResumeHandler::handle(state, connection, payload).await
            }
            // Unreachable due to the is_client_op check
            OpCode::Username => {
                tracing::error!(op = %message.op, "Unhandled client op code");
                Ok(Some(CloseCode::UnknownOpcode))
            }
        }
    }
}
