//! HTTP page retrieval.
//!
//! ### Contract
//! - Timed GET, decoded response body as text, or a transport error.
//! - Non-2xx statuses are transport errors.
//! - Decoding never fails: UTF-8 first, permissive Latin-1 fallback for
//!   malformed bytes.
//! - No retries; callers decide retry policy.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, header};

use legisync_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string. The origin site serves different markup to
    /// obvious bots, so the default imitates a browser.
    pub user_agent: String,

    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; legisync/0.1)".to_string(),
            timeout: Duration::from_millis(15_000),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout(), max_bytes: config.max_bytes }
    }
}

/// Source of raw page text, the seam between live HTTP and test stubs.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL and return the decoded body text.
    async fn get_text(&self, url: &str) -> Result<String, Error>;
}

/// HTTP fetch client for origin-site pages.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header(
                header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::TooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::TooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let text = decode_text(&bytes);

        tracing::debug!(
            "fetched {} in {}ms ({} bytes)",
            url,
            start.elapsed().as_millis(),
            bytes.len()
        );

        Ok(text)
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(format!("network error: {}", e))
    }
}

/// Decode response bytes as UTF-8, falling back to Latin-1.
///
/// The fallback maps each byte to the code point of the same value, so it
/// never fails on malformed input.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_ms: 2_000, max_bytes: 1_024, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Duration::from_millis(2_000));
        assert_eq!(config.max_bytes, 1_024);
        assert_eq!(config.user_agent, app.user_agent);
    }

    #[test]
    fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_text("héllo".as_bytes()), "héllo");
    }

    #[test]
    fn test_decode_malformed_bytes_falls_back_to_latin1() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte.
        let bytes = [b'h', 0xE9, b'l', b'l', b'o'];
        assert_eq!(decode_text(&bytes), "héllo");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_text(&[]), "");
    }
}
