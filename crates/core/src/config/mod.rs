//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LEGISYNC_*)
//! 2. TOML config file (if LEGISYNC_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LEGISYNC_*)
/// 2. TOML config file (if LEGISYNC_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the durable SQLite database.
    ///
    /// Set via LEGISYNC_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// The origin site serves different markup to obvious bots, so the
    /// default imitates a browser.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Live mode flag: live scraping and real address lookups when true,
    /// deterministic fallback data when false.
    ///
    /// Read once at façade construction; a mode change requires a new
    /// façade instance.
    #[serde(default)]
    pub live: bool,

    /// Bill-listing page URL.
    #[serde(default = "default_bill_list_url")]
    pub bill_list_url: String,

    /// Primary representative roster page URL.
    #[serde(default = "default_roster_url")]
    pub roster_url: String,

    /// Fallback member grid page URL.
    #[serde(default = "default_grid_url")]
    pub grid_url: String,

    /// Base URL for per-bill detail pages (content, actions, hearings,
    /// co-sponsors).
    #[serde(default = "default_bill_base_url")]
    pub bill_base_url: String,

    /// Base URL for resolving relative document links.
    #[serde(default = "default_documents_base_url")]
    pub documents_base_url: String,

    /// Stateful legislator lookup endpoint.
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// Legislative year used in detail page URLs.
    #[serde(default = "default_year")]
    pub legislative_year: String,

    /// Session code used in detail page URLs (e.g. "R" for regular).
    #[serde(default = "default_session_code")]
    pub session_code: String,

    /// TTL for the bill-list cache, in seconds.
    #[serde(default = "default_bills_ttl_secs")]
    pub bills_ttl_secs: u64,

    /// TTL for the per-bill detail cache, in seconds. Detail pages change
    /// less often than the list, so this runs longer.
    #[serde(default = "default_detail_ttl_secs")]
    pub detail_ttl_secs: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./legisync.sqlite")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; legisync/0.1)".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_bill_list_url() -> String {
    "https://house.mo.gov/BillList.aspx".into()
}

fn default_roster_url() -> String {
    "https://house.mo.gov/MemberRoster.aspx?year=2025&code=R".into()
}

fn default_grid_url() -> String {
    "https://house.mo.gov/MemberGridCluster.aspx".into()
}

fn default_bill_base_url() -> String {
    "https://house.mo.gov".into()
}

fn default_documents_base_url() -> String {
    "https://documents.house.mo.gov".into()
}

fn default_lookup_url() -> String {
    "https://www.senate.mo.gov/legislookup/default".into()
}

fn default_year() -> String {
    "2025".into()
}

fn default_session_code() -> String {
    "R".into()
}

fn default_bills_ttl_secs() -> u64 {
    300
}

fn default_detail_ttl_secs() -> u64 {
    3_600
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            live: false,
            bill_list_url: default_bill_list_url(),
            roster_url: default_roster_url(),
            grid_url: default_grid_url(),
            bill_base_url: default_bill_base_url(),
            documents_base_url: default_documents_base_url(),
            lookup_url: default_lookup_url(),
            legislative_year: default_year(),
            session_code: default_session_code(),
            bills_ttl_secs: default_bills_ttl_secs(),
            detail_ttl_secs: default_detail_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Bill-list cache TTL as a Duration.
    pub fn bills_ttl(&self) -> Duration {
        Duration::from_secs(self.bills_ttl_secs)
    }

    /// Bill-detail cache TTL as a Duration.
    pub fn detail_ttl(&self) -> Duration {
        Duration::from_secs(self.detail_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LEGISYNC_`
    /// 2. TOML file from `LEGISYNC_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LEGISYNC_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LEGISYNC_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
