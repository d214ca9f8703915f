//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use forum_core::error::{AppError, ErrorKind};
use forum_core::result::AppResult;
use forum_core::traits::UserDirectory;
use forum_core::types::{UserId, UserSummary};

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user with an already-hashed password.
    pub async fn create(
        &self,
        nickname: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<UserSummary> {
        let id = UserId::new();
        sqlx::query(
            "INSERT INTO users (id, nickname, email, password_hash, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(nickname)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create user", e))?;

        Ok(UserSummary {
            id,
            nickname: nickname.to_string(),
        })
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn list_users_except(&self, viewer: UserId) -> AppResult<Vec<UserSummary>> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, nickname FROM users WHERE id != ? ORDER BY nickname ASC",
        )
        .bind(viewer)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }
}
