//! The tagged envelope every frame is wrapped in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Untyped envelope: a discriminating tag plus a payload whose shape
/// depends on the tag.
///
/// Inbound frames are decoded into this first and then reinterpreted per
/// tag. Application broadcasts (`new_post` and friends) are sent in this
/// form because their payload is opaque to the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Envelope tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Tag-dependent payload
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    /// Wrap an already-structured payload.
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Wrap any serializable payload.
    pub fn from_payload<T: Serialize + ?Sized>(
        kind: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(kind, serde_json::to_value(payload)?))
    }
}
