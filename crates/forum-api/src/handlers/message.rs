//! Conversation history handler.

use axum::Json;
use axum::extract::{Query, State};

use forum_core::error::{AppError, ErrorKind};
use forum_core::types::{ChatMessage, UserId};

use crate::dto::request::HistoryQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/messages?with={user_id}&offset={n}
///
/// One page of the conversation with `with`, counted back from the newest
/// message and returned oldest first.
pub async fn conversation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, ApiError> {
    let with = query
        .with
        .as_deref()
        .filter(|w| !w.is_empty())
        .ok_or_else(|| AppError::validation("with parameter is required"))?;

    let other: UserId = with
        .parse()
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid user id", e))?;

    let messages = state
        .messages
        .conversation(user_id, other, state.config.history.page_size, query.offset())
        .await?;

    Ok(Json(ApiResponse::ok(messages)))
}
