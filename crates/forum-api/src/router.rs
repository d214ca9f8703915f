//! Route definitions for the forum HTTP API.
//!
//! REST routes are mounted under `/api`; the WebSocket upgrade lives at
//! `/ws`. Every handler receives `AppState` through Axum's `State` extractor.

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(message_routes())
        .merge(user_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Conversation history
fn message_routes() -> Router<AppState> {
    Router::new().route("/messages", get(handlers::message::conversation))
}

/// User directory
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(handlers::user::list_users))
}

/// Liveness and detailed health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
