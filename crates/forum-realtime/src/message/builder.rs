//! Helpers that build serialized frames ready to enqueue.

use serde::Serialize;

use forum_core::AppResult;
use forum_core::types::ChatMessage;

use super::serializer::{serialize_event, serialize_outbound};
use super::types::OutboundMessage;
use crate::presence::entry::PresenceEntry;

/// Build a `user_list` frame.
pub fn user_list_frame(entries: Vec<PresenceEntry>) -> AppResult<String> {
    Ok(serialize_outbound(&OutboundMessage::UserList(entries))?)
}

/// Build a `new_message` frame.
pub fn new_message_frame(message: ChatMessage) -> AppResult<String> {
    Ok(serialize_outbound(&OutboundMessage::NewMessage(message))?)
}

/// Build a `force_logout` frame.
pub fn force_logout_frame(reason: &str) -> AppResult<String> {
    Ok(serialize_outbound(&OutboundMessage::ForceLogout(
        reason.to_string(),
    ))?)
}

/// Build an application event frame under an arbitrary tag.
pub fn event_frame<T: Serialize + ?Sized>(kind: &str, payload: &T) -> AppResult<String> {
    Ok(serialize_event(kind, payload)?)
}
