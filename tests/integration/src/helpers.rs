//! Test helpers for integration tests
//!
//! Provides utilities for spawning a gateway over an in-memory store and
//! driving it with real WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::{SinkExt, StreamExt};
use relay_common::{AppConfig, AppSettings, Environment, ServerConfig, StoreConfig};
use relay_core::value_objects::MessageId;
use relay_gateway::protocol::{ChatEventPayload, GatewayMessage, OpCode, UsernamePayload};
use relay_gateway::server::{create_app, create_gateway_state};
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected message
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a connection must stay quiet to count as silent
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Test gateway instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a gateway on an ephemeral port backed by an in-memory store
    pub async fn start() -> Result<Self> {
        let config = AppConfig {
            app: AppSettings {
                name: "relay-test".to_string(),
                env: Environment::Development,
            },
            gateway: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            store: StoreConfig {
                // One connection: each `sqlite::memory:` connection is
                // its own database
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
        };

        let state = create_gateway_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Connect a new WebSocket client to this gateway
    pub async fn client(&self) -> Result<TestClient> {
        TestClient::connect(self.addr).await
    }
}

/// A WebSocket client speaking the gateway protocol
pub struct TestClient {
    ws: WsStream,
    /// Display name the server assigned at connect
    pub username: String,
}

impl TestClient {
    /// Connect and consume the Username event
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (ws, _) = connect_async(format!("ws://{addr}/gateway")).await?;
        let mut client = Self {
            ws,
            username: String::new(),
        };
        client.username = client.expect_username().await?;
        Ok(client)
    }

    /// Send a raw gateway message
    pub async fn send_message(&mut self, message: GatewayMessage) -> Result<()> {
        self.ws.send(Message::Text(message.to_json()?)).await?;
        Ok(())
    }

    /// Join a room
    pub async fn join(&mut self, room: &str) -> Result<()> {
        self.send_message(GatewayMessage {
            op: OpCode::JoinRoom,
            d: Some(json!({ "room": room })),
        })
        .await
    }

    /// Leave a room
    pub async fn leave(&mut self, room: &str) -> Result<()> {
        self.send_message(GatewayMessage {
            op: OpCode::LeaveRoom,
            d: Some(json!({ "room": room })),
        })
        .await
    }

    /// Send a chat message, optionally with an explicit client offset
    pub async fn send_chat(&mut self, content: &str, client_offset: Option<&str>) -> Result<()> {
        let d = match client_offset {
            Some(offset) => json!({ "content": content, "client_offset": offset }),
            None => json!({ "content": content }),
        };
        self.send_message(GatewayMessage {
            op: OpCode::ChatMessage,
            d: Some(d),
        })
        .await
    }

    /// Resume a prior session: replay everything after `since`, then go live
    pub async fn resume(&mut self, room: &str, since: MessageId) -> Result<()> {
        self.send_message(GatewayMessage {
            op: OpCode::Resume,
            d: Some(json!({ "room": room, "since": since })),
        })
        .await
    }

    /// Receive the next gateway message, skipping transport frames
    pub async fn recv_message(&mut self) -> Result<GatewayMessage> {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.ws.next())
                .await
                .context("timed out waiting for a gateway message")?
                .context("connection closed")??;

            match frame {
                Message::Text(text) => return Ok(GatewayMessage::from_json(&text)?),
                Message::Ping(_) | Message::Pong(_) => {}
                Message::Close(frame) => bail!("connection closed: {frame:?}"),
                other => bail!("unexpected frame: {other:?}"),
            }
        }
    }

    /// Expect the Username event and return the assigned name
    pub async fn expect_username(&mut self) -> Result<String> {
        let message = self.recv_message().await?;
        if message.op != OpCode::Username {
            bail!("expected Username, got {}", message.op);
        }
        let payload: UsernamePayload =
            serde_json::from_value(message.d.context("Username event without payload")?)?;
        Ok(payload.username)
    }

    /// Expect a chat event
    pub async fn expect_chat(&mut self) -> Result<ChatEventPayload> {
        let message = self.recv_message().await?;
        if message.op != OpCode::ChatMessage {
            bail!("expected ChatMessage, got {}", message.op);
        }
        Ok(serde_json::from_value(
            message.d.context("chat event without payload")?,
        )?)
    }

    /// Expect `count` chat events and return them in arrival order
    pub async fn expect_chats(&mut self, count: usize) -> Result<Vec<ChatEventPayload>> {
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            events.push(self.expect_chat().await?);
        }
        Ok(events)
    }

    /// Assert that nothing arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.ws.next()).await {
            Err(_) => Ok(()),
            Ok(None) => bail!("connection closed while expecting silence"),
            Ok(Some(frame)) => {
                let frame = frame?;
                match frame {
                    Message::Ping(_) | Message::Pong(_) => Ok(()),
                    other => bail!("expected silence, got {other:?}"),
                }
            }
        }
    }
}
