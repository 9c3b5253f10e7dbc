//! Routes for third-party app connections and their dashboard widgets.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::app_connection::AppConnection;
use serde::{Deserialize, Serialize};
use services::services::dashboard::{AppDashboard, AppSummary};
use tracing::info;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct ConnectAppRequest {
    pub account_label: Option<String>,
}

/// GET /api/apps
pub async fn list_apps(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<AppSummary>>>, ApiError> {
    let apps = state.dashboards.list_apps().await?;
    Ok(ResponseJson(ApiResponse::success(apps)))
}

/// GET /api/apps/{app_id}/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<ResponseJson<ApiResponse<AppDashboard>>, ApiError> {
    let dashboard = state.dashboards.dashboard(&app_id).await?;
    Ok(ResponseJson(ApiResponse::success(dashboard)))
}

/// POST /api/apps/{app_id}/connect
pub async fn connect_app(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
    Json(payload): Json<ConnectAppRequest>,
) -> Result<ResponseJson<ApiResponse<AppConnection>>, ApiError> {
    let connection = state
        .dashboards
        .connect(&app_id, payload.account_label.as_deref())
        .await?;
    info!(app_id = %app_id, "Connected app via API");
    Ok(ResponseJson(ApiResponse::success(connection)))
}

/// POST /api/apps/{app_id}/disconnect
pub async fn disconnect_app(
    State(state): State<AppState>,
    Path(app_id): Path<String>,
) -> Result<ResponseJson<ApiResponse<AppConnection>>, ApiError> {
    let connection = state.dashboards.disconnect(&app_id).await?;
    Ok(ResponseJson(ApiResponse::success(connection)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/apps",
        Router::new()
            .route("/", get(list_apps))
            .route("/{app_id}/dashboard", get(get_dashboard))
            .route("/{app_id}/connect", post(connect_app))
            .route("/{app_id}/disconnect", post(disconnect_app)),
    )
}
