//! Message router: validate, persist, read back, fan out.

use std::sync::Arc;

use tracing::{debug, error, info};

use forum_core::AppResult;
use forum_core::traits::MessageStore;
use forum_core::types::{ChatMessage, MessageId, NewChatMessage};

use crate::connection::handle::ClientHandle;
use crate::connection::manager::ConnectionManager;
use crate::message::builder;
use crate::message::serializer::deserialize_inbound;
use crate::message::types::{InboundMessage, SendMessagePayload};
use crate::message::validator::{validate_frame, validate_send_message};
use crate::presence::PresencePublisher;

/// Dispatches decoded envelopes from a client's read loop.
pub struct MessageRouter {
    connections: Arc<ConnectionManager>,
    messages: Arc<dyn MessageStore>,
    presence: Arc<PresencePublisher>,
}

impl std::fmt::Debug for MessageRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRouter").finish()
    }
}

impl MessageRouter {
    /// Creates a new router.
    pub fn new(
        connections: Arc<ConnectionManager>,
        messages: Arc<dyn MessageStore>,
        presence: Arc<PresencePublisher>,
    ) -> Self {
        Self {
            connections,
            messages,
            presence,
        }
    }

    /// Handle one raw inbound frame.
    ///
    /// Nothing here is fatal to the connection: malformed frames, unknown
    /// tags, and rejected sends are logged and discarded.
    pub async fn handle_frame(&self, client: &ClientHandle, raw: &str) {
        self.connections.metrics().frame_received();

        if let Err(e) = validate_frame(raw, self.connections.config().max_frame_bytes) {
            debug!(conn_id = %client.id, error = %e, "Discarding frame");
            return;
        }

        match deserialize_inbound(raw) {
            Ok(InboundMessage::SendMessage(payload)) => {
                if let Err(e) = self.handle_send_message(client, payload).await {
                    debug!(conn_id = %client.id, error = %e, "send_message not routed");
                }
            }
            Ok(InboundMessage::Unknown(kind)) => {
                debug!(conn_id = %client.id, kind = %kind, "Discarding unrecognized envelope");
            }
            Err(e) => {
                debug!(conn_id = %client.id, error = %e, "Discarding malformed frame");
            }
        }
    }

    /// Deliver a private message from `sender`.
    ///
    /// The record is persisted and read back before anything is enqueued;
    /// a failure at any step aborts with nothing delivered. The receiver gets
    /// the message only if online, the sender always gets the echo (so a
    /// note to oneself arrives twice), and a presence round follows.
    pub async fn handle_send_message(
        &self,
        sender: &ClientHandle,
        payload: SendMessagePayload,
    ) -> AppResult<ChatMessage> {
        let metrics = self.connections.metrics();

        let send = validate_send_message(payload).inspect_err(|e| {
            debug!(user_id = %sender.user_id, error = %e, "Dropping invalid send_message");
            metrics.message_rejected();
        })?;

        let new_message = NewChatMessage {
            id: MessageId::new(),
            sender_id: sender.user_id,
            receiver_id: send.receiver_id,
            content: send.content,
            image_url: send.image_url,
        };

        if let Err(e) = self.messages.persist_message(&new_message).await {
            error!(user_id = %sender.user_id, error = %e, "Failed to persist message");
            metrics.message_rejected();
            return Err(e);
        }

        let stored = self
            .messages
            .fetch_message(new_message.id)
            .await
            .inspect_err(|e| {
                error!(message_id = %new_message.id, error = %e, "Failed to read back message");
                metrics.message_rejected();
            })?;

        let frame = builder::new_message_frame(stored.clone()).inspect_err(|_| {
            metrics.message_rejected();
        })?;

        match self
            .connections
            .send_to_user(&stored.receiver_id, frame.clone())
        {
            Some(outcome) => {
                debug!(receiver = %stored.receiver_id, ?outcome, "Delivered to receiver")
            }
            None => debug!(receiver = %stored.receiver_id, "Receiver offline, stored only"),
        }

        self.connections.enqueue(sender, frame);
        metrics.message_routed();

        info!(
            message_id = %stored.id,
            sender = %stored.sender_id,
            receiver = %stored.receiver_id,
            "Private message routed"
        );

        self.presence.broadcast_presence().await;

        Ok(stored)
    }
}
