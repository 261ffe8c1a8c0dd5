//! Message ID - store-assigned 64-bit sequence identifier
//!
//! Ids are assigned by the Message Store on append and are strictly
//! increasing. Their order within a room is the delivery order; they are
//! never reused or reordered after creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned message sequence identifier (64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// The "nothing seen yet" resume offset
    pub const ZERO: Self = Self(0);

    /// Create a new MessageId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if this is the zero (unset) offset
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Error when parsing a MessageId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageIdParseError {
    #[error("invalid message id format")]
    InvalidFormat,
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MessageId> for i64 {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

impl std::str::FromStr for MessageId {
    type Err = MessageIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(MessageId)
            .map_err(|_| MessageIdParseError::InvalidFormat)
    }
}
