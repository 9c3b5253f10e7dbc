use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

/// Help-center article shown in the editor sidebar
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct DocArticle {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub body: String, // markdown
    pub position: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDocArticle {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub body: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl DocArticle {
    pub async fn upsert(pool: &SqlitePool, data: &UpsertDocArticle) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, DocArticle>(
            r#"INSERT INTO doc_articles (id, slug, title, category, body, position, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(slug) DO UPDATE SET
                title = excluded.title,
                category = excluded.category,
                body = excluded.body,
                position = excluded.position,
                published = excluded.published,
                updated_at = datetime('now', 'subsec')
            RETURNING id, slug, title, category, body, position, published, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.category)
        .bind(&data.body)
        .bind(data.position)
        .bind(data.published)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, DocArticle>(
            r#"SELECT id, slug, title, category, body, position, published, created_at, updated_at
            FROM doc_articles
            WHERE slug = $1"#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_published_by_category(
        pool: &SqlitePool,
        category: &str,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DocArticle>(
            r#"SELECT id, slug, title, category, body, position, published, created_at, updated_at
            FROM doc_articles
            WHERE category = $1 AND published = 1
            ORDER BY position ASC"#,
        )
        .bind(category)
        .fetch_all(pool)
        .await
    }
}
