//! SQLite implementation of MessageStore

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use relay_core::entities::Message;
use relay_core::traits::{AppendOutcome, MessageStore, RepoResult};
use relay_core::value_objects::{MessageId, RoomName};

use crate::models::MessageModel;

use super::error::map_db_error;

/// SQLite implementation of MessageStore
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    /// Create a new SqliteMessageStore
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    /// Idempotent append
    ///
    /// The `ON CONFLICT .. DO NOTHING` + read-back pair leans entirely on
    /// the `client_offset` uniqueness constraint: two concurrent retries
    /// of the same logical send cannot both insert, whereas an
    /// application-level pre-check could pass for both.
    #[instrument(skip(self, content))]
    async fn append(
        &self,
        room: &RoomName,
        username: &str,
        content: &str,
        client_offset: &str,
    ) -> RepoResult<AppendOutcome> {
        let inserted = sqlx::query_as::<_, MessageModel>(
            r"
            INSERT INTO messages (room, username, content, client_offset)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(client_offset) DO NOTHING
            RETURNING id, room, username, content, client_offset
            ",
        )
        .bind(room.as_str())
        .bind(username)
        .bind(content)
        .bind(client_offset)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            return Ok(AppendOutcome {
                message: Message::try_from(model)?,
                deduplicated: false,
            });
        }

        // Conflict: the offset was appended before - resolve to the
        // surviving row so the caller can acknowledge with the original id.
        let existing = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, room, username, content, client_offset
            FROM messages
            WHERE client_offset = ?
            ",
        )
        .bind(client_offset)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        tracing::debug!(
            client_offset = %client_offset,
            message_id = existing.id,
            "Duplicate append resolved to existing row"
        );

        Ok(AppendOutcome {
            message: Message::try_from(existing)?,
            deduplicated: true,
        })
    }

    #[instrument(skip(self))]
    async fn list(&self, room: &RoomName) -> RepoResult<Vec<Message>> {
        let models = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, room, username, content, client_offset
            FROM messages
            WHERE room = ?
            ORDER BY id ASC
            ",
        )
        .bind(room.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Message::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_after(&self, room: &RoomName, since: MessageId) -> RepoResult<Vec<Message>> {
        let models = sqlx::query_as::<_, MessageModel>(
            r"
            SELECT id, room, username, content, client_offset
            FROM messages
            WHERE room = ? AND id > ?
            ORDER BY id ASC
            ",
        )
        .bind(room.as_str())
        .bind(since.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Message::try_from).collect()
    }
}
