pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use db::DBService;
use services::services::{
    apps::AppRegistry,
    dashboard::{AppDataProvider, DashboardService},
    template_catalog::TemplateCatalog,
};

/// Shared, read-mostly state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub catalog: Arc<TemplateCatalog>,
    pub dashboards: DashboardService,
}

impl AppState {
    pub fn new(
        db: DBService,
        catalog: TemplateCatalog,
        provider: Arc<dyn AppDataProvider>,
    ) -> Self {
        let dashboards =
            DashboardService::new(db.pool.clone(), Arc::new(AppRegistry::new()), provider);
        Self {
            db,
            catalog: Arc::new(catalog),
            dashboards,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .with_state(state)
}
