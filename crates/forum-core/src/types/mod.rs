//! Shared value types: typed identifiers and the records the hub exchanges
//! with its collaborators.

pub mod id;
pub mod message;
pub mod user;

pub use id::{MessageId, UserId};
pub use message::{ChatMessage, NewChatMessage};
pub use user::UserSummary;
