//! Value objects - immutable types that represent domain concepts

mod message_id;
mod room_name;

pub use message_id::{MessageId, MessageIdParseError};
pub use room_name::RoomName;
