//! Room membership registry
//!
//! Process-local mapping between live connections and rooms. In a
//! horizontally scaled deployment each process holds its own registry and
//! cross-process fan-out happens behind the `RoomBroadcaster` port.

mod connection;
mod manager;

pub use connection::Connection;
pub use manager::{JoinOutcome, RoomRegistry};
