//! Sync reconcilers.
//!
//! Each sync run scrapes one logical dataset and applies it to durable
//! storage as an idempotent upsert batch. A run that scrapes zero records
//! applies nothing and fails loudly instead, so a broken parse or an
//! origin-site outage can never wipe previously reconciled data.

use crate::fetch::PageFetcher;
use crate::parse::{parse_bill_list, parse_member_grid, parse_member_roster};
use legisync_core::{Error, StoreDb};

/// Outcome of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Records inserted for the first time.
    pub added: u64,

    /// Existing records rewritten in place, changed or not.
    pub updated: u64,

    /// Records scraped from the source, including unchanged ones.
    pub total: u64,
}

/// Scrape the bill listing and reconcile it into storage.
pub async fn sync_bills(fetcher: &dyn PageFetcher, store: &StoreDb, url: &str) -> Result<SyncSummary, Error> {
    let page = fetcher.get_text(url).await?;
    let bills = parse_bill_list(&page);

    if bills.is_empty() {
        return Err(Error::EmptyScrape(format!("bill list at {}", url)));
    }

    let total = bills.len() as u64;
    tracing::info!("scraped {} bills from {}", total, url);

    let (added, updated) = store.upsert_bills(bills).await?;
    Ok(SyncSummary { added, updated, total })
}

/// Scrape the representative roster and reconcile it into storage.
///
/// The roster page is preferred. When it fails to fetch or parses to zero
/// records, the member grid serves as a fallback source for the same data.
/// Only when both sources come up empty does the run fail.
pub async fn sync_representatives(
    fetcher: &dyn PageFetcher,
    store: &StoreDb,
    roster_url: &str,
    grid_url: &str,
) -> Result<SyncSummary, Error> {
    let mut reps = match fetcher.get_text(roster_url).await {
        Ok(page) => parse_member_roster(&page),
        Err(e) => {
            tracing::warn!("roster fetch failed, trying grid: {}", e);
            Vec::new()
        }
    };

    if reps.is_empty() {
        tracing::info!("roster yielded no records, falling back to grid");
        let page = fetcher.get_text(grid_url).await?;
        reps = parse_member_grid(&page);
    }

    if reps.is_empty() {
        return Err(Error::EmptyScrape(format!("roster at {} and grid at {}", roster_url, grid_url)));
    }

    let total = reps.len() as u64;
    tracing::info!("scraped {} representatives", total);

    let (added, updated) = store.upsert_representatives(reps).await?;
    Ok(SyncSummary { added, updated, total })
}
