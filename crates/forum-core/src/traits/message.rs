//! Private message persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::id::{MessageId, UserId};
use crate::types::message::{ChatMessage, NewChatMessage};

/// Durable storage for private messages.
///
/// Persisting and reading back are separate calls; the hub needs the read
/// to pick up the denormalized sender name.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Store a new message under its pre-generated id.
    async fn persist_message(&self, message: &NewChatMessage) -> AppResult<()>;

    /// Fetch a stored message. Missing ids are a `NotFound` error.
    async fn fetch_message(&self, id: MessageId) -> AppResult<ChatMessage>;

    /// Timestamp of the most recent message exchanged between two users, in
    /// either direction.
    async fn last_message_time(&self, a: UserId, b: UserId) -> AppResult<Option<DateTime<Utc>>>;

    /// A page of the conversation between two users in chronological order.
    ///
    /// `offset` counts back from the newest message.
    async fn conversation(
        &self,
        a: UserId,
        b: UserId,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<ChatMessage>>;
}
