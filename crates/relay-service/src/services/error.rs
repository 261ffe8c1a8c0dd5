//! Service layer error types

use relay_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Send attempted with no active room; dropped with no side effect.
    /// Never surfaced to the client as a protocol event - presenting the
    /// precondition is the client's responsibility.
    NotInRoom,

    /// Domain rule violation or store failure
    Domain(DomainError),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInRoom => write!(f, "Session is not in a room"),
            Self::Domain(e) => write!(f, "{e}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ServiceError {
    /// True when the failure is transient and a client retry with the
    /// same client offset is safe
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_transient())
    }
}

/// Service result type
pub type ServiceResult<T> = Result<T, ServiceError>;
