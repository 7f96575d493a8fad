//! Fetch façade.
//!
//! ### Resolution order
//! Every read degrades through the same ladder: durable storage, then the
//! in-process TTL cache, then a live scrape (live mode only), then the
//! deterministic fallback dataset. Callers always get data; the façade
//! never surfaces a transport or storage error, it logs and moves one rung
//! down.
//!
//! The mode is read once at construction. Flipping the config flag at
//! runtime requires building a new façade.

use std::sync::Arc;

use chrono::Utc;
use url::Url;

use crate::fetch::PageFetcher;
use crate::mock;
use crate::parse::{
    parse_bill_actions, parse_bill_list, parse_cosponsors, parse_document_links, parse_hearing_status,
};
use crate::resolver::{Address, AddressResolver, ResolverConfig};
use legisync_core::{
    AppConfig, Error, KeyedTtlCache, StoreDb, TtlCache,
    model::{Bill, BillDetail, LookupResult},
};

/// Data acquisition mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scrape the origin site and run real address lookups.
    Live,
    /// Serve storage, cache, and the deterministic fallback dataset only.
    Fallback,
}

/// Unified read surface over storage, caches, live scraping, and fallback
/// data.
pub struct DataFetcher {
    mode: Mode,
    store: StoreDb,
    pages: Arc<dyn PageFetcher>,
    resolver: Option<AddressResolver>,
    bills_cache: TtlCache<Vec<Bill>>,
    detail_cache: KeyedTtlCache<String, BillDetail>,
    bill_list_url: String,
    bill_base_url: String,
    documents_base_url: String,
    legislative_year: String,
    session_code: String,
}

impl DataFetcher {
    /// Build a façade over the given storage and page source.
    ///
    /// The address resolver is only constructed in live mode; fallback mode
    /// answers lookups from the deterministic dataset.
    pub fn new(config: &AppConfig, store: StoreDb, pages: Arc<dyn PageFetcher>) -> Result<Self, Error> {
        let mode = if config.live { Mode::Live } else { Mode::Fallback };
        let resolver = match mode {
            Mode::Live => Some(AddressResolver::new(ResolverConfig::from(config))?),
            Mode::Fallback => None,
        };

        Ok(Self {
            mode,
            store,
            pages,
            resolver,
            bills_cache: TtlCache::new(config.bills_ttl()),
            detail_cache: KeyedTtlCache::new(config.detail_ttl()),
            bill_list_url: config.bill_list_url.clone(),
            bill_base_url: config.bill_base_url.trim_end_matches('/').to_string(),
            documents_base_url: config.documents_base_url.trim_end_matches('/').to_string(),
            legislative_year: config.legislative_year.clone(),
            session_code: config.session_code.clone(),
        })
    }

    /// The mode this façade was constructed with.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fetch the current bill slate.
    ///
    /// Storage wins when it holds any bills, then the TTL cache, then a
    /// live scrape, then the fallback dataset. A live scrape that succeeds
    /// populates the cache but not storage; the sync runs own storage
    /// writes.
    pub async fn fetch_bills(&self) -> Vec<Bill> {
        match self.store.list_bills().await {
            Ok(bills) if !bills.is_empty() => return bills,
            Ok(_) => {}
            Err(e) => tracing::warn!("bill storage read failed: {}", e),
        }

        if let Some(bills) = self.bills_cache.get() {
            return bills;
        }

        if self.mode == Mode::Live {
            match self.pages.get_text(&self.bill_list_url).await {
                Ok(page) => {
                    let bills = parse_bill_list(&page);
                    if !bills.is_empty() {
                        self.bills_cache.put(bills.clone());
                        return bills;
                    }
                    tracing::warn!("live bill list parsed to zero records");
                }
                Err(e) => tracing::warn!("live bill list fetch failed: {}", e),
            }
        }

        mock::bills()
    }

    /// Resolve an address to its officials.
    ///
    /// Live mode runs the stateful lookup session; fallback mode answers
    /// from the zip-keyed dataset and always succeeds.
    pub async fn fetch_representative_for_address(&self, address: &Address) -> Option<LookupResult> {
        match &self.resolver {
            Some(resolver) => resolver.lookup(address).await,
            None => Some(mock::lookup_for_zip(&address.zip)),
        }
    }

    /// Fetch lazy enrichment for one bill.
    ///
    /// Four detail pages are fetched independently; any one failing leaves
    /// the others' fields populated. Returns `None` only when every page
    /// fails, and caches anything better than that.
    ///
    /// Unlike the bills ladder, this is not mode-gated: there is no stored
    /// or fallback rendition of detail data, so the page source is asked in
    /// either mode and an offline fallback-mode façade simply gets `None`.
    pub async fn get_bill_details(&self, number: &str) -> Option<BillDetail> {
        let key = number.trim().to_string();
        if let Some(detail) = self.detail_cache.get(&key) {
            return Some(detail);
        }

        let content = self.fetch_detail_page("BillContent.aspx", &key, true).await;
        let actions = self.fetch_detail_page("BillActions.aspx", &key, false).await;
        let hearings = self.fetch_detail_page("BillHearings.aspx", &key, false).await;
        let cosponsors = self.fetch_detail_page("BillCoSponsors.aspx", &key, false).await;

        if content.is_none() && actions.is_none() && hearings.is_none() && cosponsors.is_none() {
            tracing::warn!("all detail pages failed for {}", key);
            return None;
        }

        let detail = BillDetail {
            actions: actions.as_deref().map(parse_bill_actions).unwrap_or_default(),
            hearing_status: hearings.as_deref().and_then(parse_hearing_status),
            documents: content
                .as_deref()
                .map(|page| parse_document_links(page, &self.documents_base_url))
                .unwrap_or_default(),
            cosponsors: cosponsors.as_deref().map(parse_cosponsors).unwrap_or_default(),
            fetched_at: Some(Utc::now()),
        };

        self.detail_cache.put(key, detail.clone());
        Some(detail)
    }

    async fn fetch_detail_page(&self, page: &str, number: &str, style_new: bool) -> Option<String> {
        let url = match self.detail_url(page, number, style_new) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("detail url for {}: {}", page, e);
                return None;
            }
        };

        match self.pages.get_text(&url).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("detail page {} failed: {}", url, e);
                None
            }
        }
    }

    fn detail_url(&self, page: &str, number: &str, style_new: bool) -> Result<String, Error> {
        let mut params = vec![
            ("bill", number),
            ("year", self.legislative_year.as_str()),
            ("code", self.session_code.as_str()),
        ];
        if style_new {
            params.push(("style", "new"));
        }

        let url = Url::parse_with_params(&format!("{}/{}", self.bill_base_url, page), &params)
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }
}
