//! Representative sync entry point.
//!
//! Scrapes the member roster (grid fallback) and reconciles it into
//! durable storage. Intended to run on a schedule; a failed run exits
//! non-zero and leaves storage untouched.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use legisync_client::{FetchClient, FetchConfig, sync_representatives};
use legisync_core::{AppConfig, StoreDb};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        "syncing representatives from {} into {}",
        config.roster_url,
        config.db_path.display()
    );

    let store = StoreDb::open(&config.db_path).await?;
    let fetcher = FetchClient::new(FetchConfig::from(&config))?;

    let summary = sync_representatives(&fetcher, &store, &config.roster_url, &config.grid_url).await?;

    println!(
        "representatives: {} added, {} updated, {} scraped",
        summary.added, summary.updated, summary.total
    );

    Ok(())
}
