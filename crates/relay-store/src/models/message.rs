//! Message database model

use sqlx::FromRow;

/// Database model for the messages table
///
/// Rows are append-only: never updated, never deleted (retention is out
/// of scope).
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub room: String,
    pub username: String,
    pub content: String,
    pub client_offset: String,
}
