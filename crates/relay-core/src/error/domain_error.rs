//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Every store failure is recovered locally by the caller (logged,
/// operation aborted); none of these crash the process.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Room name is empty")]
    EmptyRoomName,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Check if this error is transient and the operation may be retried
    ///
    /// A retry of `append` with the same client offset is always safe:
    /// the uniqueness constraint makes the second attempt a no-op.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Check if this is a validation error (client misbehavior, dropped silently)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyRoomName | Self::ContentTooLong { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(DomainError::StoreUnavailable("disk".into()).is_transient());
        assert!(!DomainError::EmptyRoomName.is_transient());
    }

    #[test]
    fn test_validation_classification() {
        assert!(DomainError::EmptyRoomName.is_validation());
        assert!(DomainError::ContentTooLong { max: 2000 }.is_validation());
        assert!(!DomainError::InternalError("x".into()).is_validation());
    }
}
