//! Connection authentication: resolves the presented session token before
//! the upgrade is accepted.

use std::sync::Arc;

use forum_core::error::AppError;
use forum_core::traits::SessionResolver;
use forum_core::types::UserId;

/// Authenticates connections through the session collaborator.
#[derive(Clone)]
pub struct WsAuthenticator {
    sessions: Arc<dyn SessionResolver>,
}

impl std::fmt::Debug for WsAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsAuthenticator").finish()
    }
}

impl WsAuthenticator {
    /// Creates a new authenticator.
    pub fn new(sessions: Arc<dyn SessionResolver>) -> Self {
        Self { sessions }
    }

    /// Resolves `token` to its user. Blank or unknown tokens are rejected.
    pub async fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::authentication("Missing session token"));
        }

        self.sessions
            .resolve_session(token)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid or expired session"))
    }
}
