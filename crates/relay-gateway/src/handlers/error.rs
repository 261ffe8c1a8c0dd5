//! Handler error types

use crate::protocol::CloseCode;
use thiserror::Error;

/// Handler error type
///
/// Only protocol violations become errors here. A dropped message (no
/// room, blank room, store failure) is logged inside its handler and is
/// never an error - the server does not tell a misbehaving client why a
/// message was not delivered.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid payload received
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert to a close code (if applicable)
    pub fn to_close_code(&self) -> Option<CloseCode> {
        match self {
            Self::InvalidPayload(_) => Some(CloseCode::DecodeError),
            Self::Internal(_) => Some(CloseCode::UnknownError),
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
