//! SQLite connection pool management.

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

use forum_core::config::DatabaseConfig;
use forum_core::error::{AppError, ErrorKind};

/// Wrapper around the sqlx SQLite connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: SqlitePool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    ///
    /// In-memory URLs are pinned to a single, never-recycled connection,
    /// since every SQLite memory connection is its own database.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Connecting to SQLite"
        );

        let mut options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        options = if is_memory_url(&config.url) {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
        };

        let pool = options.connect(&config.url).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

        info!("Successfully connected to SQLite");
        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_memory_url() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file.db?mode=memory"));
        assert!(!is_memory_url("sqlite://forum.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_connect_and_health_check() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let db = DatabasePool::connect(&config).await.unwrap();
        assert!(db.health_check().await.unwrap());
        db.close().await;
    }
}
