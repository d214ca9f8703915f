//! Collaborator interfaces consumed by the realtime hub and the HTTP layer.
//!
//! The hub never talks to the database directly; it only sees these traits.
//! Concrete implementations live in `forum-database`.

pub mod message;
pub mod session;
pub mod user;

pub use message::MessageStore;
pub use session::SessionResolver;
pub use user::UserDirectory;
