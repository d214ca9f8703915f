//! Repository implementations for the collaborator traits.

pub mod message;
pub mod session;
pub mod user;

pub use message::MessageRepository;
pub use session::SessionRepository;
pub use user::UserRepository;

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let config = forum_core::config::DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let db = crate::connection::DatabasePool::connect(&config)
        .await
        .expect("memory pool");
    crate::migration::run_migrations(db.pool())
        .await
        .expect("migrations");
    db.pool().clone()
}
