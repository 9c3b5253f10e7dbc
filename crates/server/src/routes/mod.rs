use axum::Router;

use crate::AppState;

pub mod apps;
pub mod health;
pub mod templates;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(templates::router())
        .merge(apps::router())
}
