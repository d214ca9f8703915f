//! Session token resolution.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;

/// Resolves an opaque session token to the user it belongs to.
#[async_trait]
pub trait SessionResolver: Send + Sync + 'static {
    /// Return the owning user, or `None` when the token is unknown.
    async fn resolve_session(&self, token: &str) -> AppResult<Option<UserId>>;
}
