//! Repository implementations

mod error;
mod message;

pub use message::SqliteMessageStore;
