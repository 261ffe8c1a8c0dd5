//! Gateway server setup
//!
//! Provides the main WebSocket server configuration and routes.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use crate::registry::RoomRegistry;
use axum::{routing::get, Router};
use relay_common::{AppConfig, AppError};
use relay_core::traits::{MessageStore, RoomBroadcaster};
use relay_service::{DeliveryService, RecoveryService};
use relay_store::SqliteMessageStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub async fn create_gateway_state(config: AppConfig) -> Result<GatewayState, AppError> {
    // Open the message store
    tracing::info!(url = %config.store.url, "Opening message store...");
    let db_config = relay_store::DatabaseConfig {
        url: config.store.url.clone(),
        max_connections: config.store.max_connections,
        ..Default::default()
    };
    let pool = relay_store::create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    relay_store::init_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("Message store ready");

    let store: Arc<dyn MessageStore> = Arc::new(SqliteMessageStore::new(pool));

    // Room registry doubles as the in-process broadcaster
    let registry = RoomRegistry::new_shared();
    let broadcaster: Arc<dyn RoomBroadcaster> = registry.clone();

    let delivery = Arc::new(DeliveryService::new(store.clone(), broadcaster));
    let recovery = Arc::new(RecoveryService::new(store));

    Ok(GatewayState::new(registry, delivery, recovery, config))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid gateway address: {e}")))?;

    // Create gateway state
    let state = create_gateway_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
