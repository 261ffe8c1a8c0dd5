//! # relay-store
//!
//! Store layer implementing the `MessageStore` port with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides the durable, append-only message log the delivery
//! and recovery engines run against. It handles:
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - The `SqliteMessageStore` repository with atomic idempotent append
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_store::pool::{create_pool, init_schema, DatabaseConfig};
//! use relay_store::SqliteMessageStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     init_schema(&pool).await?;
//!     let store = SqliteMessageStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, init_schema, DatabaseConfig, SqlitePool};
pub use repositories::SqliteMessageStore;
