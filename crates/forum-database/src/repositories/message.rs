//! Private message repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::traits::MessageStore;
use forum_core::types::{ChatMessage, MessageId, NewChatMessage, UserId};

const SELECT_MESSAGE: &str = "SELECT m.id, m.sender_id, m.receiver_id, u.nickname AS sender_name, \
     m.content, m.image_url, m.created_at \
     FROM messages m JOIN users u ON u.id = m.sender_id";

/// Repository for private messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn persist_message(&self, message: &NewChatMessage) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO messages (id, sender_id, receiver_id, content, image_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .bind(message.image_url.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert message", e))?;
        Ok(())
    }

    async fn fetch_message(&self, id: MessageId) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(&format!("{SELECT_MESSAGE} WHERE m.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch message", e))?
            .ok_or_else(|| AppError::not_found(format!("Message {id} not found")))
    }

    async fn last_message_time(&self, a: UserId, b: UserId) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT created_at FROM messages \
             WHERE (sender_id = ? AND receiver_id = ?) OR (sender_id = ? AND receiver_id = ?) \
             ORDER BY created_at DESC, rowid DESC LIMIT 1",
        )
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read last message time", e)
        })
    }

    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<ChatMessage>> {
        let mut page = sqlx::query_as::<_, ChatMessage>(&format!(
            "{SELECT_MESSAGE} \
             WHERE (m.sender_id = ? AND m.receiver_id = ?) OR (m.sender_id = ? AND m.receiver_id = ?) \
             ORDER BY m.created_at DESC, m.rowid DESC LIMIT ? OFFSET ?"
        ))
        .bind(a)
        .bind(b)
        .bind(b)
        .bind(a)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load conversation", e))?;

        // Newest-first from the query; callers want chronological order.
        page.reverse();
        Ok(page)
    }
}
