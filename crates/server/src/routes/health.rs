use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use serde::Serialize;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub templates: usize,
}

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<HealthStatus>>, ApiError> {
    sqlx::query("SELECT 1").execute(&state.db.pool).await?;

    Ok(ResponseJson(ApiResponse::success(HealthStatus {
        status: "ok",
        templates: state.catalog.len(),
    })))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
