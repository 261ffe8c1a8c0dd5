//! Database models

mod message;

pub use message::MessageModel;
