//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let uptime = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database_ok = match state.db.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let online = state.realtime.connections.online_count();

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        database: if database_ok {
            "connected"
        } else {
            "unavailable"
        }
        .to_string(),
        ws_connections: online,
        online_users: online,
        realtime: state.realtime.metrics.snapshot(),
    }))
}
