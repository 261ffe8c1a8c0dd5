//! Gateway state
//!
//! Application state for the gateway server.

use crate::registry::RoomRegistry;
use relay_common::AppConfig;
use relay_service::{DeliveryService, RecoveryService};
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Room membership registry
    registry: Arc<RoomRegistry>,
    /// Delivery engine
    delivery: Arc<DeliveryService>,
    /// Recovery engine
    recovery: Arc<RecoveryService>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        registry: Arc<RoomRegistry>,
        delivery: Arc<DeliveryService>,
        recovery: Arc<RecoveryService>,
        config: AppConfig,
    ) -> Self {
        Self {
            registry,
            delivery,
            recovery,
            config: Arc::new(config),
        }
    }

    /// Get the room registry
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Get the delivery engine
    pub fn delivery(&self) -> &DeliveryService {
        &self.delivery
    }

    /// Get the recovery engine
    pub fn recovery(&self) -> &RecoveryService {
        &self.recovery
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
