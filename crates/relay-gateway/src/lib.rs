//! # relay-gateway
//!
//! WebSocket gateway: protocol, room membership registry, op handlers,
//! and server wiring for the chat relay.

pub mod handlers;
pub mod names;
pub mod protocol;
pub mod registry;
pub mod server;

pub use server::run;
