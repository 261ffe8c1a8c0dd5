//! Message entity <-> model mapper

use relay_core::entities::Message;
use relay_core::error::DomainError;
use relay_core::value_objects::{MessageId, RoomName};

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
///
/// Fallible only because `RoomName` re-validates: the store never accepts
/// a blank room on append, so a failure here means the table was written
/// past the repository.
impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::new(model.id),
            room: RoomName::new(model.room)?,
            username: model.username,
            content: model.content,
            client_offset: model.client_offset,
        })
    }
}
