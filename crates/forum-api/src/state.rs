//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use forum_core::config::AppConfig;
use forum_core::traits::{MessageStore, UserDirectory};
use forum_database::DatabasePool;
use forum_database::repositories::{MessageRepository, SessionRepository, UserRepository};
use forum_realtime::{RealtimeEngine, WsAuthenticator};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Realtime hub
    pub realtime: RealtimeEngine,
    /// Session token resolution
    pub authenticator: WsAuthenticator,
    /// User directory
    pub users: Arc<dyn UserDirectory>,
    /// Message storage
    pub messages: Arc<dyn MessageStore>,
    /// When the process started serving
    pub started_at: DateTime<Utc>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("realtime", &self.realtime)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the repositories, the authenticator, and the realtime engine
    /// over one database pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> Self {
        let users: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(db.pool().clone()));
        let messages: Arc<dyn MessageStore> =
            Arc::new(MessageRepository::new(db.pool().clone()));
        let sessions = Arc::new(SessionRepository::new(db.pool().clone()));

        let realtime =
            RealtimeEngine::new(config.realtime.clone(), users.clone(), messages.clone());
        let authenticator = WsAuthenticator::new(sessions);

        Self {
            config: Arc::new(config),
            db,
            realtime,
            authenticator,
            users,
            messages,
            started_at: Utc::now(),
        }
    }
}
