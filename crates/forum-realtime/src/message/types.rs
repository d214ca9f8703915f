//! Inbound and outbound envelope type definitions.

use serde::{Deserialize, Serialize};

use forum_core::types::ChatMessage;

use crate::presence::entry::PresenceEntry;

/// Recognized envelope tags.
pub mod kind {
    /// Client asks the hub to deliver a private message.
    pub const SEND_MESSAGE: &str = "send_message";
    /// A persisted private message.
    pub const NEW_MESSAGE: &str = "new_message";
    /// The viewer's presence roster.
    pub const USER_LIST: &str = "user_list";
    /// The client was displaced by a newer login.
    pub const FORCE_LOGOUT: &str = "force_logout";
    /// A post was created (application broadcast).
    pub const NEW_POST: &str = "new_post";
}

/// Envelopes sent by the client, decoded per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// `send_message`
    SendMessage(SendMessagePayload),
    /// Any tag the hub does not handle; the frame is discarded.
    Unknown(String),
}

/// Payload of a `send_message` envelope.
///
/// Missing fields decode as empty so validation can reject them uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    /// Recipient user ID
    #[serde(default)]
    pub receiver_id: String,
    /// Text body
    #[serde(default)]
    pub content: String,
    /// Optional uploaded image reference
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Envelopes the hub itself produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Personalized presence roster.
    UserList(Vec<PresenceEntry>),
    /// A persisted private message.
    NewMessage(ChatMessage),
    /// Displacement notice carrying a reason.
    ForceLogout(String),
}
