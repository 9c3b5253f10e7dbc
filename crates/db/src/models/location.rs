use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Country {
    pub id: Uuid,
    pub code: String, // ISO 3166-1 alpha-2
    pub name: String,
    pub phone_code: Option<String>,
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct Region {
    pub id: Uuid,
    pub country_id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
pub struct City {
    pub id: Uuid,
    pub region_id: Uuid,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertCountry {
    pub code: String,
    pub name: String,
    pub phone_code: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertRegion {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertCity {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Country {
    /// Insert the country, or refresh the row already holding `data.code`.
    pub async fn upsert(pool: &SqlitePool, data: &UpsertCountry) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Country>(
            r#"INSERT INTO countries (id, code, name, phone_code, currency)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(code) DO UPDATE SET
                name = excluded.name,
                phone_code = excluded.phone_code,
                currency = excluded.currency,
                updated_at = datetime('now', 'subsec')
            RETURNING id, code, name, phone_code, currency, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.phone_code)
        .bind(&data.currency)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_code(pool: &SqlitePool, code: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Country>(
            r#"SELECT id, code, name, phone_code, currency, created_at, updated_at
            FROM countries
            WHERE code = $1"#,
        )
        .bind(code)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Country>(
            r#"SELECT id, code, name, phone_code, currency, created_at, updated_at
            FROM countries
            ORDER BY name ASC"#,
        )
        .fetch_all(pool)
        .await
    }
}

impl Region {
    pub async fn upsert(
        pool: &SqlitePool,
        country_id: Uuid,
        data: &UpsertRegion,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Region>(
            r#"INSERT INTO regions (id, country_id, code, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(country_id, code) DO UPDATE SET
                name = excluded.name,
                updated_at = datetime('now', 'subsec')
            RETURNING id, country_id, code, name, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(country_id)
        .bind(&data.code)
        .bind(&data.name)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_country_id(
        pool: &SqlitePool,
        country_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Region>(
            r#"SELECT id, country_id, code, name, created_at, updated_at
            FROM regions
            WHERE country_id = $1
            ORDER BY name ASC"#,
        )
        .bind(country_id)
        .fetch_all(pool)
        .await
    }
}

impl City {
    pub async fn upsert(
        pool: &SqlitePool,
        region_id: Uuid,
        data: &UpsertCity,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, City>(
            r#"INSERT INTO cities (id, region_id, name, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(region_id, name) DO UPDATE SET
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                updated_at = datetime('now', 'subsec')
            RETURNING id, region_id, name, latitude, longitude, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(region_id)
        .bind(&data.name)
        .bind(data.latitude)
        .bind(data.longitude)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_region_id(
        pool: &SqlitePool,
        region_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, City>(
            r#"SELECT id, region_id, name, latitude, longitude, created_at, updated_at
            FROM cities
            WHERE region_id = $1
            ORDER BY name ASC"#,
        )
        .bind(region_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cities")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DBService;

    fn france() -> UpsertCountry {
        UpsertCountry {
            code: "FR".to_string(),
            name: "France".to_string(),
            phone_code: Some("+33".to_string()),
            currency: Some("EUR".to_string()),
        }
    }

    #[tokio::test]
    async fn test_country_upsert_keeps_id_and_updates_fields() {
        let db = DBService::new_in_memory().await.unwrap();

        let first = Country::upsert(&db.pool, &france()).await.unwrap();
        let renamed = Country::upsert(
            &db.pool,
            &UpsertCountry {
                name: "French Republic".to_string(),
                ..france()
            },
        )
        .await
        .unwrap();

        assert_eq!(first.id, renamed.id);
        assert_eq!(renamed.name, "French Republic");
        assert_eq!(Country::find_all(&db.pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cities_are_unique_per_region() {
        let db = DBService::new_in_memory().await.unwrap();
        let country = Country::upsert(&db.pool, &france()).await.unwrap();
        let region = Region::upsert(
            &db.pool,
            country.id,
            &UpsertRegion {
                code: "IDF".to_string(),
                name: "Île-de-France".to_string(),
            },
        )
        .await
        .unwrap();

        let paris = UpsertCity {
            name: "Paris".to_string(),
            latitude: Some(48.8566),
            longitude: Some(2.3522),
        };
        let a = City::upsert(&db.pool, region.id, &paris).await.unwrap();
        let b = City::upsert(&db.pool, region.id, &paris).await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(City::count(&db.pool).await.unwrap(), 1);
        assert_eq!(
            City::find_by_region_id(&db.pool, region.id).await.unwrap()[0].latitude,
            Some(48.8566)
        );
    }
}
