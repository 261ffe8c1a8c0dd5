//! Business logic services
//!
//! The Delivery Engine persists and fans out new messages; the Recovery
//! Engine replays history to joining and resuming sessions.

pub mod delivery;
pub mod error;
pub mod recovery;

// Re-export all services for convenience
pub use delivery::DeliveryService;
pub use error::{ServiceError, ServiceResult};
pub use recovery::RecoveryService;
