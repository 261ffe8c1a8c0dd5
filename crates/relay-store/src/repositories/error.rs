//! Database error mapping

use relay_core::error::DomainError;

/// Map a SQLx error to a domain error
///
/// Everything the store can throw is a transient `StoreUnavailable` from
/// the caller's point of view: the operation is aborted, nothing partial
/// is written, and a retry with the same client offset is safe.
pub(crate) fn map_db_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "Database operation failed");
    DomainError::StoreUnavailable(err.to_string())
}
