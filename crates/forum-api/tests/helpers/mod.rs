//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use forum_api::{AppState, build_router};
use forum_core::config::{AppConfig, DatabaseConfig};
use forum_core::types::{MessageId, NewChatMessage, UserId};
use forum_database::DatabasePool;
use forum_database::repositories::{SessionRepository, UserRepository};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching repositories directly
    pub state: AppState,
}

/// Test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over an in-memory database
    pub async fn new() -> Self {
        let config = AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        forum_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, db);
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Create a user and a session token for them
    pub async fn create_user(&self, nickname: &str) -> (UserId, String) {
        let users = UserRepository::new(self.state.db.pool().clone());
        let user = users
            .create(nickname, &format!("{nickname}@example.com"), "hash")
            .await
            .expect("create user");

        let token = format!("token-{nickname}");
        SessionRepository::new(self.state.db.pool().clone())
            .create(&token, user.id)
            .await
            .expect("create session");

        (user.id, token)
    }

    /// Store a message directly
    pub async fn store_message(&self, from: UserId, to: UserId, content: &str) {
        self.state
            .messages
            .persist_message(&NewChatMessage {
                id: MessageId::new(),
                sender_id: from,
                receiver_id: to,
                content: content.to_string(),
                image_url: None,
            })
            .await
            .expect("persist message");
    }

    /// Send a GET request with optional extra headers
    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
