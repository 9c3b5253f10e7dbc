//! Dashboard widgets for connected third-party apps.
//!
//! Metrics come from an external [`AppDataProvider`]; this module only decides what
//! a widget shows given the connection state and whatever data is available.

use std::sync::Arc;

use async_trait::async_trait;
use db::models::app_connection::AppConnection;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};
use ts_rs::TS;

use super::apps::{AppDescriptor, AppId, AppRegistry, RegistryError};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Campaign {
    pub name: String,
    pub sent: u64,
    pub open_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PageViews {
    pub path: String,
    pub views: u64,
}

/// Metrics fetched for an app, one shape per kind of integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppMetrics {
    Payments {
        currency: String,
        available_balance: f64,
        pending_balance: f64,
        customers: u64,
        revenue: Vec<SeriesPoint>,
    },
    EmailMarketing {
        subscribers: u64,
        campaigns: Vec<Campaign>,
    },
    Search {
        records: u64,
        searches: u64,
        no_result_rate: f64,
    },
    Analytics {
        visitors: u64,
        page_views: u64,
        bounce_rate: f64,
        top_pages: Vec<PageViews>,
    },
    Crm {
        contacts: u64,
        open_deals: u64,
    },
    Social {
        followers: u64,
        posts: u64,
        engagement_rate: f64,
    },
}

/// Source of per-app metrics. Fetching, caching and refresh live outside this crate.
#[async_trait]
pub trait AppDataProvider: Send + Sync {
    async fn fetch(&self, app: AppId) -> Option<AppMetrics>;
}

/// Provider used when no metrics backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDataProvider;

#[async_trait]
impl AppDataProvider for NoDataProvider {
    async fn fetch(&self, _app: AppId) -> Option<AppMetrics> {
        None
    }
}

/// What a dashboard widget renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    NotConnected { connect_label: String },
    Empty { message: String },
    Ready { metrics: AppMetrics },
}

impl DashboardView {
    /// Missing data is never an error, only an empty widget.
    pub fn build(app: &AppDescriptor, connected: bool, metrics: Option<AppMetrics>) -> Self {
        match (connected, metrics) {
            (false, _) => Self::NotConnected {
                connect_label: format!("Connect {}", app.name),
            },
            (true, None) => Self::Empty {
                message: app.empty_state.clone(),
            },
            (true, Some(metrics)) => Self::Ready { metrics },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AppSummary {
    pub app: AppDescriptor,
    pub connected: bool,
    pub account_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AppDashboard {
    pub app: AppDescriptor,
    pub connected: bool,
    pub account_label: Option<String>,
    pub view: DashboardView,
}

#[derive(Clone)]
pub struct DashboardService {
    pool: SqlitePool,
    registry: Arc<AppRegistry>,
    provider: Arc<dyn AppDataProvider>,
}

impl DashboardService {
    pub fn new(
        pool: SqlitePool,
        registry: Arc<AppRegistry>,
        provider: Arc<dyn AppDataProvider>,
    ) -> Self {
        Self {
            pool,
            registry,
            provider,
        }
    }

    /// Every registered app with its connection status.
    pub async fn list_apps(&self) -> Result<Vec<AppSummary>, DashboardError> {
        let connections = AppConnection::find_all(&self.pool).await?;

        Ok(self
            .registry
            .all()
            .iter()
            .map(|app| {
                let connection = connections
                    .iter()
                    .find(|c| c.app_id == app.id.to_string());
                AppSummary {
                    app: app.clone(),
                    connected: connection.is_some_and(|c| c.connected),
                    account_label: connection.and_then(|c| c.account_label.clone()),
                }
            })
            .collect())
    }

    pub async fn dashboard(&self, app_id: &str) -> Result<AppDashboard, DashboardError> {
        let app = self.registry.lookup(app_id)?;
        let connection = AppConnection::find_by_app_id(&self.pool, &app.id.to_string()).await?;
        let connected = connection.as_ref().is_some_and(|c| c.connected);

        // Only connected apps are worth asking the provider about.
        let metrics = if connected {
            self.provider.fetch(app.id).await
        } else {
            None
        };
        debug!(app = %app.id, connected, has_metrics = metrics.is_some(), "Built dashboard");

        Ok(AppDashboard {
            app: app.clone(),
            connected,
            account_label: connection.and_then(|c| c.account_label),
            view: DashboardView::build(app, connected, metrics),
        })
    }

    pub async fn connect(
        &self,
        app_id: &str,
        account_label: Option<&str>,
    ) -> Result<AppConnection, DashboardError> {
        let app = self.registry.lookup(app_id)?;
        let connection =
            AppConnection::connect(&self.pool, &app.id.to_string(), account_label).await?;
        info!(app = %app.id, "App connected");
        Ok(connection)
    }

    pub async fn disconnect(&self, app_id: &str) -> Result<AppConnection, DashboardError> {
        let app = self.registry.lookup(app_id)?;
        let connection = AppConnection::disconnect(&self.pool, &app.id.to_string()).await?;
        info!(app = %app.id, "App disconnected");
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use db::DBService;

    use super::*;

    struct FixedProvider(AppMetrics);

    #[async_trait]
    impl AppDataProvider for FixedProvider {
        async fn fetch(&self, _app: AppId) -> Option<AppMetrics> {
            Some(self.0.clone())
        }
    }

    fn subscribers() -> AppMetrics {
        AppMetrics::EmailMarketing {
            subscribers: 1_250,
            campaigns: vec![Campaign {
                name: "Spring launch".to_string(),
                sent: 1_200,
                open_rate: 0.41,
            }],
        }
    }

    async fn service(provider: Arc<dyn AppDataProvider>) -> DashboardService {
        let db = DBService::new_in_memory().await.unwrap();
        DashboardService::new(db.pool, Arc::new(AppRegistry::new()), provider)
    }

    #[test]
    fn test_view_branches_on_connection_and_data() {
        let registry = AppRegistry::new();
        let mailchimp = registry.get(AppId::Mailchimp);

        assert_eq!(
            DashboardView::build(mailchimp, false, Some(subscribers())),
            DashboardView::NotConnected {
                connect_label: "Connect Mailchimp".to_string()
            }
        );
        assert_eq!(
            DashboardView::build(mailchimp, true, None),
            DashboardView::Empty {
                message: "No campaigns sent yet".to_string()
            }
        );
        assert!(matches!(
            DashboardView::build(mailchimp, true, Some(subscribers())),
            DashboardView::Ready { .. }
        ));
    }

    #[tokio::test]
    async fn test_disconnected_app_never_reaches_provider_data() {
        let service = service(Arc::new(FixedProvider(subscribers()))).await;

        let dashboard = service.dashboard("mailchimp").await.unwrap();
        assert!(!dashboard.connected);
        assert!(matches!(dashboard.view, DashboardView::NotConnected { .. }));

        service.connect("mailchimp", Some("Newsletter")).await.unwrap();
        let dashboard = service.dashboard("mailchimp").await.unwrap();
        assert_eq!(dashboard.account_label.as_deref(), Some("Newsletter"));
        assert_eq!(
            dashboard.view,
            DashboardView::Ready {
                metrics: subscribers()
            }
        );
    }

    #[tokio::test]
    async fn test_connected_without_data_shows_empty_state() {
        let service = service(Arc::new(NoDataProvider)).await;
        service.connect("stripe", None).await.unwrap();

        let dashboard = service.dashboard("stripe").await.unwrap();
        assert_eq!(
            dashboard.view,
            DashboardView::Empty {
                message: "No payments yet".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_list_apps_reflects_connections() {
        let service = service(Arc::new(NoDataProvider)).await;
        service.connect("algolia", Some("docs-index")).await.unwrap();
        service.connect("slack", None).await.unwrap();
        service.disconnect("slack").await.unwrap();

        let apps = service.list_apps().await.unwrap();
        let connected: Vec<_> = apps
            .iter()
            .filter(|a| a.connected)
            .map(|a| a.app.id)
            .collect();
        assert_eq!(connected, vec![AppId::Algolia]);
    }

    #[tokio::test]
    async fn test_unknown_app_is_rejected() {
        let service = service(Arc::new(NoDataProvider)).await;
        assert!(matches!(
            service.dashboard("friendster").await,
            Err(DashboardError::Registry(RegistryError::UnknownApp(_)))
        ));
    }
}
