//! Private chat message records exchanged with the storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MessageId, UserId};

/// A persisted private message, as read back from storage.
///
/// `sender_name` is denormalized from the sender's nickname at read time.
/// Records are immutable once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ChatMessage {
    /// Message identifier.
    pub id: MessageId,
    /// Author of the message.
    pub sender_id: UserId,
    /// Recipient of the message.
    pub receiver_id: UserId,
    /// Sender's display name.
    pub sender_name: String,
    /// Text body; may be empty when an image is attached.
    pub content: String,
    /// Optional uploaded image reference.
    pub image_url: Option<String>,
    /// When the message was stored.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatMessage {
    /// Pre-generated identifier.
    pub id: MessageId,
    /// Author.
    pub sender_id: UserId,
    /// Recipient.
    pub receiver_id: UserId,
    /// Text body.
    pub content: String,
    /// Optional image reference.
    pub image_url: Option<String>,
}
