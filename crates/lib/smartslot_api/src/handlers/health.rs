//! Liveness and readiness endpoints.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::{AppError, AppResult};

/// `GET /health` — liveness, no dependencies touched.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /ready` — readiness, pings the database.
pub async fn ready(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|e| AppError::DbUnavailable(e.to_string()))?;
    Ok(Json(serde_json::json!({ "status": "ready" })))
}
