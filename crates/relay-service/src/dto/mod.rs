//! Data transfer objects for outbound delivery
//!
//! The service layer owns the wire-agnostic shape of a delivered line;
//! the gateway wraps it into protocol payloads.

use relay_core::entities::Message;
use relay_core::value_objects::MessageId;
use serde::Serialize;

/// One deliverable chat line: formatted text plus the id the client
/// records as its resume offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine {
    pub text: String,
    pub id: MessageId,
}

impl From<&Message> for ChatLine {
    fn from(message: &Message) -> Self {
        Self {
            text: message.formatted(),
            id: message.id,
        }
    }
}
