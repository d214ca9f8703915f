//! Presence roster entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forum_core::types::UserId;

/// One other user as seen by a viewer. Computed per push, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntry {
    /// User ID
    pub id: UserId,
    /// Display name
    pub nickname: String,
    /// Whether the user had a registered client when the roster was built
    pub online: bool,
    /// Last message exchanged with the viewer; `null` if they never talked
    pub last_msg: Option<DateTime<Utc>>,
}
