//! Wire envelopes: types, decoding, validation, and frame builders.

pub mod builder;
pub mod envelope;
pub mod serializer;
pub mod types;
pub mod validator;

pub use envelope::Envelope;
pub use serializer::ProtocolError;
pub use types::{InboundMessage, OutboundMessage, SendMessagePayload};
