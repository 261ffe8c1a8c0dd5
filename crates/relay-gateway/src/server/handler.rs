//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::handlers::MessageDispatcher;
use crate::names;
use crate::protocol::{CloseCode, GatewayMessage};
use crate::registry::Connection;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    // Assign session identity once, at connect
    let session_id = uuid::Uuid::new_v4().to_string();
    let username = names::generate_username();

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    // Register connection
    let connection = state
        .registry()
        .add_connection(session_id.clone(), username.clone(), tx);

    tracing::info!(
        session_id = %session_id,
        username = %username,
        "WebSocket connection established"
    );

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Send the assigned display name immediately
    let hello = GatewayMessage::username(username.as_str());
    if let Ok(json) = hello.to_json() {
        if ws_sink.send(Message::Text(json.into())).await.is_err() {
            tracing::warn!(session_id = %session_id, "Failed to send Username message");
            state.registry().disconnect(&session_id).await;
            return;
        }
    }

    // Clone state for tasks
    let state_recv = state.clone();
    let session_id_recv = session_id.clone();
    let connection_recv = connection.clone();

    // Spawn task to receive messages from WebSocket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(close_code) =
                        handle_text_message(&state_recv, &connection_recv, &text).await
                    {
                        tracing::debug!(
                            session_id = %session_id_recv,
                            close_code = ?close_code,
                            "Closing connection due to error"
                        );
                        return Some(close_code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %session_id_recv,
                        "Binary messages not supported"
                    );
                    return Some(CloseCode::DecodeError);
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Ping/Pong received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    return Some(CloseCode::UnknownError);
                }
            }
        }
        None
    });

    // Clone for send task
    let session_id_send = session_id.clone();

    // Spawn task to send messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = msg.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        session_id = %session_id_send,
                        "Failed to send message to WebSocket"
                    );
                    break;
                }
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        result = recv_task => {
            if let Ok(Some(close_code)) = result {
                tracing::debug!(
                    session_id = %session_id,
                    close_code = ?close_code,
                    "Receive task ended with close code"
                );
            }
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    // Clean up: membership is released, the session falls out of every
    // live member set. A send persisted just before this point stays
    // persisted - the session simply misses its own broadcast copy.
    tracing::info!(session_id = %session_id, "Cleaning up connection");
    state.registry().disconnect(&session_id).await;
}

/// Handle a text message from the client
async fn handle_text_message(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), CloseCode> {
    // Parse the message
    let message = match GatewayMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Failed to parse message"
            );
            return Err(CloseCode::DecodeError);
        }
    };

    tracing::trace!(
        session_id = %connection.session_id(),
        op = %message.op,
        "Received message"
    );

    // Dispatch to handler
    match MessageDispatcher::dispatch(state, connection, message).await {
        Ok(Some(close_code)) => Err(close_code),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!(
                session_id = %connection.session_id(),
                error = %e,
                "Handler error"
            );
            Err(e.to_close_code().unwrap_or(CloseCode::UnknownError))
        }
    }
}
