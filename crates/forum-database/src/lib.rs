//! # forum-database
//!
//! SQLite connection management and the concrete collaborator
//! implementations (sessions, users, messages) consumed by the hub.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
