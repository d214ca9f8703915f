//! User directory handler.

use axum::Json;
use axum::extract::State;

use forum_core::types::UserSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users: every user except the caller, ordered by nickname
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let users = state.users.list_users_except(user_id).await?;
    Ok(Json(ApiResponse::ok(users)))
}
