//! User directory lookups.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;
use crate::types::user::UserSummary;

/// Read access to registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Every user except `viewer`, ordered by nickname ascending.
    async fn list_users_except(&self, viewer: UserId) -> AppResult<Vec<UserSummary>>;
}
