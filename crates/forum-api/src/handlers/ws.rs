//! WebSocket upgrade handler.

use axum::extract::ws::WebSocket;
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use tracing::info;

use forum_core::error::AppError;
use forum_core::types::UserId;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::transport;

/// GET /ws?token={session}: WebSocket upgrade
///
/// The session is resolved before the upgrade; unknown tokens get a 401 and
/// no socket.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    if state.realtime.is_shutting_down() {
        return Err(AppError::service_unavailable("Server is shutting down").into());
    }

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, user_id, socket)))
}

/// Hands an established socket to the realtime hub.
async fn handle_ws_connection(state: AppState, user_id: UserId, socket: WebSocket) {
    info!(user_id = %user_id, "WebSocket connection established");

    let (source, sink) = transport::split(socket);
    state.realtime.serve_connection(user_id, source, sink).await;

    info!(user_id = %user_id, "WebSocket connection closed");
}
