use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Vendor serving a model
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "ai_provider", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiProvider {
    Anthropic,
    Openai,
    Google,
    Mistral,
    Meta,
    Cohere,
}

/// Entry in the AI model catalog offered to content editors
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct AiModel {
    pub id: Uuid,
    pub provider: AiProvider,
    pub model_key: String,
    pub display_name: String,
    pub context_window: i64,
    pub input_price_per_mtok: Option<f64>,  // USD per million input tokens
    pub output_price_per_mtok: Option<f64>, // USD per million output tokens
    pub supports_vision: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertAiModel {
    pub provider: AiProvider,
    pub model_key: String,
    pub display_name: String,
    pub context_window: i64,
    pub input_price_per_mtok: Option<f64>,
    pub output_price_per_mtok: Option<f64>,
    #[serde(default)]
    pub supports_vision: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AiModel {
    pub async fn upsert(pool: &SqlitePool, data: &UpsertAiModel) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, AiModel>(
            r#"INSERT INTO ai_models (id, provider, model_key, display_name, context_window,
                input_price_per_mtok, output_price_per_mtok, supports_vision, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(model_key) DO UPDATE SET
                provider = excluded.provider,
                display_name = excluded.display_name,
                context_window = excluded.context_window,
                input_price_per_mtok = excluded.input_price_per_mtok,
                output_price_per_mtok = excluded.output_price_per_mtok,
                supports_vision = excluded.supports_vision,
                is_active = excluded.is_active,
                updated_at = datetime('now', 'subsec')
            RETURNING id, provider, model_key, display_name, context_window,
                input_price_per_mtok, output_price_per_mtok, supports_vision, is_active,
                created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(data.provider)
        .bind(&data.model_key)
        .bind(&data.display_name)
        .bind(data.context_window)
        .bind(data.input_price_per_mtok)
        .bind(data.output_price_per_mtok)
        .bind(data.supports_vision)
        .bind(data.is_active)
        .fetch_one(pool)
        .await
    }

    pub async fn find_active(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AiModel>(
            r#"SELECT id, provider, model_key, display_name, context_window,
                input_price_per_mtok, output_price_per_mtok, supports_vision, is_active,
                created_at, updated_at
            FROM ai_models
            WHERE is_active = 1
            ORDER BY provider ASC, display_name ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_key(
        pool: &SqlitePool,
        model_key: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, AiModel>(
            r#"SELECT id, provider, model_key, display_name, context_window,
                input_price_per_mtok, output_price_per_mtok, supports_vision, is_active,
                created_at, updated_at
            FROM ai_models
            WHERE model_key = $1"#,
        )
        .bind(model_key)
        .fetch_optional(pool)
        .await
    }
}
