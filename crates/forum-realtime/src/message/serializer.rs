//! JSON encoding and decoding for envelopes.

use serde::Serialize;
use thiserror::Error;

use super::envelope::Envelope;
use super::types::{InboundMessage, OutboundMessage, kind};

/// A frame that could not be interpreted. The frame is discarded and the
/// connection stays open.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not an envelope, or the payload does not fit its tag.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Blank frame.
    #[error("empty frame")]
    Empty,
    /// Frame larger than the configured limit.
    #[error("frame of {size} bytes exceeds limit of {max} bytes")]
    Oversized {
        /// Frame length in bytes
        size: usize,
        /// Configured limit
        max: usize,
    },
}

/// Serialize a hub envelope.
pub fn serialize_outbound(msg: &OutboundMessage) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}

/// Serialize an application event under an arbitrary tag.
pub fn serialize_event<T: Serialize + ?Sized>(
    kind: &str,
    payload: &T,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Envelope::from_payload(kind, payload)?)
}

/// Decode an inbound frame: envelope first, then the payload for its tag.
pub fn deserialize_inbound(text: &str) -> Result<InboundMessage, ProtocolError> {
    let envelope: Envelope = serde_json::from_str(text)?;

    match envelope.kind.as_str() {
        kind::SEND_MESSAGE => Ok(InboundMessage::SendMessage(serde_json::from_value(
            envelope.payload,
        )?)),
        _ => Ok(InboundMessage::Unknown(envelope.kind)),
    }
}
