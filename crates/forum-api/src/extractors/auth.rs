//! `AuthUser` extractor: resolves the caller's session token to a user.
//!
//! Tokens are looked for in the `X-Session-Token` header, then the `token`
//! query parameter (used by the WebSocket upgrade), then the
//! `session_token` cookie. The first one that resolves wins.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use forum_core::error::{AppError, ErrorKind};
use forum_core::types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying a per-tab session token.
pub const SESSION_HEADER: &str = "x-session-token";
/// Cookie carrying the browser-wide session token.
pub const SESSION_COOKIE: &str = "session_token";

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Candidate session tokens in lookup order.
pub fn session_tokens(parts: &Parts) -> Vec<String> {
    let mut tokens = Vec::new();

    if let Some(token) = parts
        .headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        tokens.push(token.to_string());
    }

    if let Ok(Query(TokenQuery { token: Some(token) })) =
        Query::<TokenQuery>::try_from_uri(&parts.uri)
    {
        tokens.push(token);
    }

    if let Some(cookie) = CookieJar::from_headers(&parts.headers).get(SESSION_COOKIE) {
        tokens.push(cookie.value().to_string());
    }

    tokens.retain(|t| !t.is_empty());
    tokens
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        for token in session_tokens(parts) {
            match state.authenticator.authenticate(&token).await {
                Ok(user_id) => return Ok(AuthUser(user_id)),
                Err(e) if e.kind == ErrorKind::Authentication => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::authentication("unauthorized").into())
    }
}
