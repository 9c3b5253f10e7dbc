use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// Connection state between the CMS and a third-party app account
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct AppConnection {
    pub id: Uuid,
    pub app_id: String,
    pub connected: bool,
    pub account_label: Option<String>,
    pub connected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AppConnection {
    pub async fn find_by_app_id(
        pool: &SqlitePool,
        app_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AppConnection>(
            r#"SELECT id, app_id, connected, account_label, connected_at, created_at, updated_at
            FROM app_connections
            WHERE app_id = $1"#,
        )
        .bind(app_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AppConnection>(
            r#"SELECT id, app_id, connected, account_label, connected_at, created_at, updated_at
            FROM app_connections
            ORDER BY app_id ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn connect(
        pool: &SqlitePool,
        app_id: &str,
        account_label: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AppConnection>(
            r#"INSERT INTO app_connections (id, app_id, connected, account_label, connected_at)
            VALUES ($1, $2, 1, $3, datetime('now', 'subsec'))
            ON CONFLICT(app_id) DO UPDATE SET
                connected = 1,
                account_label = excluded.account_label,
                connected_at = excluded.connected_at,
                updated_at = datetime('now', 'subsec')
            RETURNING id, app_id, connected, account_label, connected_at, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(app_id)
        .bind(account_label)
        .fetch_one(pool)
        .await
    }

    /// Mark the app disconnected; a row is created if the app was never connected.
    pub async fn disconnect(pool: &SqlitePool, app_id: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AppConnection>(
            r#"INSERT INTO app_connections (id, app_id, connected)
            VALUES ($1, $2, 0)
            ON CONFLICT(app_id) DO UPDATE SET
                connected = 0,
                account_label = NULL,
                connected_at = NULL,
                updated_at = datetime('now', 'subsec')
            RETURNING id, app_id, connected, account_label, connected_at, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(app_id)
        .fetch_one(pool)
        .await
    }
}
