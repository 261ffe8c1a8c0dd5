//! # relay-service
//!
//! Application layer containing the Delivery Engine and the Recovery
//! Engine, written against the `relay-core` ports.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::ChatLine;
pub use services::{DeliveryService, RecoveryService, ServiceError, ServiceResult};
