//! Room name - validated broadcast domain name
//!
//! Rooms are implicit: one "exists" the moment a session joins it or a
//! message references it. The only invariant a name carries is that it is
//! not blank.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a broadcast domain (chat room)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Create a room name, rejecting blank or whitespace-only input
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = DomainError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<&str> for RoomName {
    type Error = DomainError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}
