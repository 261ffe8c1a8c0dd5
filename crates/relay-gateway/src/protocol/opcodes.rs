//! Gateway operation codes
//!
//! Defines all WebSocket gateway op codes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Gateway operation codes
///
/// Op codes define the type of message being sent or received over the
/// WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Join a room (client only)
    JoinRoom = 2,
    /// Leave a room (client only)
    LeaveRoom = 3,
    /// Chat message: content + offset from the client, formatted line +
    /// id from the server (client/server)
    ChatMessage = 4,
    /// Resume a dropped session from a stated offset (client only)
    Resume = 5,
    /// Assigned display name, sent once at connect (server only)
    Username = 10,
}

impl OpCode {
    /// Create an `OpCode` from a raw integer value
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            2 => Some(Self::JoinRoom),
            3 => Some(Self::LeaveRoom),
            4 => Some(Self::ChatMessage),
            5 => Some(Self::Resume),
            10 => Some(Self::Username),
            _ => None,
        }
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this op code can be sent by the client
    #[must_use]
    pub const fn is_client_op(self) -> bool {
        matches!(
            self,
            Self::JoinRoom | Self::LeaveRoom | Self::ChatMessage | Self::Resume
        )
    }

    /// Check if this op code can be sent by the server
    #[must_use]
    pub const fn is_server_op(self) -> bool {
        matches!(self, Self::ChatMessage | Self::Username)
    }

    /// Get the name of this op code
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JoinRoom => "JoinRoom",
            Self::LeaveRoom => "LeaveRoom",
            Self::ChatMessage => "ChatMessage",
            Self::Resume => "Resume",
            Self::Username => "Username",
        }
    }
}

impl Serialize for OpCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for OpCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid op code: {value}")))
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u8())
    }
}
