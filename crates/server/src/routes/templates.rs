//! Routes for browsing the page template catalog.

use std::str::FromStr;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use serde::Deserialize;
use services::services::template_catalog::template::{
    CategoryCount, Template, TemplateCategory, TemplateSummary,
};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

/// GET /api/templates?category=
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<TemplateSummary>>>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(|c| {
            TemplateCategory::from_str(c)
                .map_err(|_| ApiError::BadRequest(format!("unknown template category: {c}")))
        })
        .transpose()?;

    Ok(ResponseJson(ApiResponse::success(
        state.catalog.summaries(category),
    )))
}

/// GET /api/templates/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ResponseJson<ApiResponse<Vec<CategoryCount>>> {
    ResponseJson(ApiResponse::success(state.catalog.category_counts()))
}

/// GET /api/templates/{template_id}
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Template>>, ApiError> {
    let template = state
        .catalog
        .get(&template_id)
        .cloned()
        .ok_or(ApiError::TemplateNotFound(template_id))?;

    Ok(ResponseJson(ApiResponse::success(template)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/templates",
        Router::new()
            .route("/", get(list_templates))
            .route("/categories", get(list_categories))
            .route("/{template_id}", get(get_template)),
    )
}
