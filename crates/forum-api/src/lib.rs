//! # forum-api
//!
//! HTTP API layer for the forum server built on Axum.
//!
//! Provides the `/ws` upgrade into the realtime hub, the conversation
//! history and user directory endpoints, health checks, session token
//! extraction, middleware (CORS, logging), and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod transport;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
