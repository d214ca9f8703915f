//! Session repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::traits::SessionResolver;
use forum_core::types::UserId;

/// Repository for login session tokens.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a session token for a user.
    pub async fn create(&self, token: &str, user_id: UserId) -> AppResult<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;
        Ok(())
    }
}

#[async_trait]
impl SessionResolver for SessionRepository {
    async fn resolve_session(&self, token: &str) -> AppResult<Option<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT user_id FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve session", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::UserRepository;
    use crate::repositories::test_pool;

    #[tokio::test]
    async fn test_resolve_known_and_unknown_tokens() {
        let pool = test_pool().await;
        let users = UserRepository::new(pool.clone());
        let sessions = SessionRepository::new(pool);

        let amy = users.create("amy", "amy@example.com", "x").await.unwrap();
        sessions.create("tok-amy", amy.id).await.unwrap();

        assert_eq!(sessions.resolve_session("tok-amy").await.unwrap(), Some(amy.id));
        assert_eq!(sessions.resolve_session("nope").await.unwrap(), None);
    }
}
