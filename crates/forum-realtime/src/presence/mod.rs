//! Per-viewer presence rosters.

pub mod entry;
pub mod publisher;

pub use entry::PresenceEntry;
pub use publisher::PresencePublisher;
