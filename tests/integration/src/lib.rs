//! Integration test support for the chat relay
//!
//! End-to-end helpers: a gateway spawned on an ephemeral port with an
//! in-memory store, and a WebSocket test client speaking the gateway
//! protocol.

pub mod helpers;
