//! SQLite pool management and schema bootstrap

mod sqlite;

pub use sqlite::{create_pool, create_pool_from_env, init_schema, DatabaseConfig};
pub use sqlx::SqlitePool;
