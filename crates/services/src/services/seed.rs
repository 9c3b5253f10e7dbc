//! Populates reference data: locations, the AI model catalog and help articles.
//!
//! Every write is an upsert, so seeding is safe to re-run. Writes happen one at a
//! time, each wrapped in the write-conflict retry.

use db::models::{
    ai_model::{AiModel, UpsertAiModel},
    doc_article::{DocArticle, UpsertDocArticle},
    location::{City, Country, Region, UpsertCity, UpsertCountry, UpsertRegion},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, info};
use ts_rs::TS;
use utils::retry::{RetryPolicy, with_retry};

const LOCATIONS: &str = include_str!("../../seed/locations.json");
const AI_MODELS: &str = include_str!("../../seed/ai_models.json");
const DOCS: &str = include_str!("../../seed/docs.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid {dataset} dataset: {source}")]
    Dataset {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Which datasets a run writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SeedTarget {
    #[default]
    All,
    Locations,
    AiModels,
    Docs,
}

impl SeedTarget {
    fn includes(self, other: SeedTarget) -> bool {
        self == SeedTarget::All || self == other
    }
}

/// Rows written per entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct SeedReport {
    pub countries: usize,
    pub regions: usize,
    pub cities: usize,
    pub ai_models: usize,
    pub doc_articles: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.countries + self.regions + self.cities + self.ai_models + self.doc_articles
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountrySeed {
    #[serde(flatten)]
    pub country: UpsertCountry,
    #[serde(default)]
    pub regions: Vec<RegionSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSeed {
    #[serde(flatten)]
    pub region: UpsertRegion,
    #[serde(default)]
    pub cities: Vec<UpsertCity>,
}

fn parse<T: for<'de> Deserialize<'de>>(
    dataset: &'static str,
    json: &str,
) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(json).map_err(|source| SeedError::Dataset { dataset, source })
}

pub struct SeedService {
    pool: SqlitePool,
    policy: RetryPolicy,
}

impl SeedService {
    pub fn new(pool: SqlitePool, policy: RetryPolicy) -> Self {
        Self { pool, policy }
    }

    /// Seed the selected datasets from the data bundled with the binary.
    pub async fn run(&self, target: SeedTarget) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        if target.includes(SeedTarget::Locations) {
            let countries = parse("locations", LOCATIONS)?;
            self.seed_locations(&countries, &mut report).await?;
        }
        if target.includes(SeedTarget::AiModels) {
            let models = parse("ai_models", AI_MODELS)?;
            report.ai_models = self.seed_ai_models(&models).await?;
        }
        if target.includes(SeedTarget::Docs) {
            let articles = parse("docs", DOCS)?;
            report.doc_articles = self.seed_docs(&articles).await?;
        }

        info!(
            target = %target,
            countries = report.countries,
            regions = report.regions,
            cities = report.cities,
            ai_models = report.ai_models,
            doc_articles = report.doc_articles,
            "Seeding complete"
        );
        Ok(report)
    }

    /// Countries, then each country's regions, then each region's cities.
    pub async fn seed_locations(
        &self,
        countries: &[CountrySeed],
        report: &mut SeedReport,
    ) -> Result<(), SeedError> {
        let pool = &self.pool;

        for seed in countries {
            let country = with_retry(&self.policy, || Country::upsert(pool, &seed.country)).await?;
            report.countries += 1;

            for region_seed in &seed.regions {
                let region = with_retry(&self.policy, || {
                    Region::upsert(pool, country.id, &region_seed.region)
                })
                .await?;
                report.regions += 1;

                for city in &region_seed.cities {
                    with_retry(&self.policy, || City::upsert(pool, region.id, city)).await?;
                    report.cities += 1;
                }
            }

            debug!(
                country = %country.code,
                regions = seed.regions.len(),
                "Seeded country"
            );
        }

        Ok(())
    }

    pub async fn seed_ai_models(&self, models: &[UpsertAiModel]) -> Result<usize, SeedError> {
        for model in models {
            with_retry(&self.policy, || AiModel::upsert(&self.pool, model)).await?;
        }
        debug!(count = models.len(), "Seeded AI models");
        Ok(models.len())
    }

    pub async fn seed_docs(&self, articles: &[UpsertDocArticle]) -> Result<usize, SeedError> {
        for article in articles {
            with_retry(&self.policy, || DocArticle::upsert(&self.pool, article)).await?;
        }
        debug!(count = articles.len(), "Seeded doc articles");
        Ok(articles.len())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use db::DBService;

    use super::*;

    async fn service() -> (DBService, SeedService) {
        let db = DBService::new_in_memory().await.unwrap();
        let service = SeedService::new(db.pool.clone(), RetryPolicy::default());
        (db, service)
    }

    #[tokio::test]
    async fn test_full_seed_writes_every_dataset() {
        let (db, service) = service().await;

        let report = service.run(SeedTarget::All).await.unwrap();
        assert_eq!(
            report,
            SeedReport {
                countries: 5,
                regions: 11,
                cities: 19,
                ai_models: 11,
                doc_articles: 11,
            }
        );

        let us = Country::find_by_code(&db.pool, "US").await.unwrap().unwrap();
        let regions = Region::find_by_country_id(&db.pool, us.id).await.unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(AiModel::find_active(&db.pool).await.unwrap().len(), 10);
        assert_eq!(
            DocArticle::find_published_by_category(&db.pool, "editor")
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_reseeding_is_idempotent() {
        let (db, service) = service().await;

        service.run(SeedTarget::Locations).await.unwrap();
        let again = service.run(SeedTarget::Locations).await.unwrap();

        assert_eq!(again.cities, 19);
        assert_eq!(City::count(&db.pool).await.unwrap(), 19);
        assert_eq!(Country::find_all(&db.pool).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_single_target_only_touches_its_tables() {
        let (db, service) = service().await;

        let report = service.run(SeedTarget::Docs).await.unwrap();
        assert_eq!(report.total(), 11);
        assert!(Country::find_all(&db.pool).await.unwrap().is_empty());
        assert!(
            DocArticle::find_by_slug(&db.pool, "getting-started")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_target_names() {
        assert_eq!(SeedTarget::from_str("ai-models").unwrap(), SeedTarget::AiModels);
        assert_eq!(SeedTarget::AiModels.to_string(), "ai-models");
        assert!(SeedTarget::from_str("users").is_err());
    }

    #[test]
    fn test_bundled_datasets_parse() {
        assert_eq!(parse::<CountrySeed>("locations", LOCATIONS).unwrap().len(), 5);
        assert!(matches!(
            parse::<CountrySeed>("locations", "{}"),
            Err(SeedError::Dataset { dataset: "locations", .. })
        ));
    }
}
