//! User directory records.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Minimal user projection used for rosters and the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Public display name.
    pub nickname: String,
}
