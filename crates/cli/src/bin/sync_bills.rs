//! Bill sync entry point.
//!
//! Scrapes the bill-listing page and reconciles it into durable storage.
//! Intended to run on a schedule (cron or similar); a failed run exits
//! non-zero and leaves storage untouched.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use legisync_client::{FetchClient, FetchConfig, sync_bills};
use legisync_core::{AppConfig, StoreDb};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    tracing::info!("syncing bills from {} into {}", config.bill_list_url, config.db_path.display());

    let store = StoreDb::open(&config.db_path).await?;
    let fetcher = FetchClient::new(FetchConfig::from(&config))?;

    let summary = sync_bills(&fetcher, &store, &config.bill_list_url).await?;

    println!(
        "bills: {} added, {} updated, {} scraped",
        summary.added, summary.updated, summary.total
    );

    Ok(())
}
