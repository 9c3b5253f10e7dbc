//! Populate reference tables. Safe to re-run; every row is upserted.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use db::DBService;
use server::config::DEFAULT_DATABASE_URL;
use services::services::seed::{SeedService, SeedTarget};
use tracing::info;
use utils::{logging::init_tracing, retry::RetryPolicy};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed locations, AI models and docs")]
struct Args {
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// all, locations, ai-models or docs
    #[arg(long, default_value = "all")]
    only: SeedTarget,

    /// Retries per write after a write conflict
    #[arg(long, default_value_t = 3)]
    retries: usize,

    #[arg(long, default_value_t = 100)]
    base_delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info,sqlx=warn");

    let args = Args::parse();
    let db = DBService::new(&args.database_url)
        .await
        .with_context(|| format!("opening database {}", args.database_url))?;

    let policy = RetryPolicy::new(args.retries, Duration::from_millis(args.base_delay_ms));
    let report = SeedService::new(db.pool.clone(), policy)
        .run(args.only)
        .await
        .context("seeding failed")?;

    info!(rows = report.total(), "Seed finished");
    Ok(())
}
