//! Address-to-representative resolver.
//!
//! ### Session shape
//! The lookup endpoint is a stateful form: a GET establishes a session
//! cookie and serves a form full of hidden fields, and the POST must echo
//! every hidden field back alongside the address or the server rejects the
//! submission. The resolver owns its own cookie-enabled HTTP client for
//! this reason; the shared page fetcher is stateless by contract.
//!
//! Any failure in the sequence collapses to `None` at the public surface.
//! A session that completes but matches no officials is not a failure; it
//! yields an empty result so callers can tell "nobody found" apart from
//! "lookup unavailable".

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::parse::parse_lookup_response;
use legisync_core::{AppConfig, Error, model::LookupResult};

/// A street address to resolve against the lookup endpoint.
#[derive(Debug, Clone)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: String,
}

/// Configuration for the resolver's HTTP session.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Lookup form URL, GET then POST.
    pub lookup_url: String,

    /// User agent string, shared with the page fetcher.
    pub user_agent: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl From<&AppConfig> for ResolverConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            lookup_url: config.lookup_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Stateful form-submission client for the legislator lookup endpoint.
pub struct AddressResolver {
    http: Client,
    config: ResolverConfig,
}

impl AddressResolver {
    /// Create a resolver with a cookie-enabled HTTP client.
    pub fn new(config: ResolverConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Resolve an address to its senator and representative.
    ///
    /// Returns `None` only when the session fails at a step; a completed
    /// session that matched no officials is still a successful lookup and
    /// comes back as an empty result. Failures are logged, never surfaced.
    pub async fn lookup(&self, address: &Address) -> Option<LookupResult> {
        let outcome = self.submit(address).await;
        if let Ok(result) = &outcome
            && result.is_empty()
        {
            tracing::debug!("lookup matched no officials for zip {}", address.zip);
        }
        collapse_session(outcome)
    }

    /// GET the form page, echo its hidden fields back in a POST with the
    /// address, and parse the response text.
    async fn submit(&self, address: &Address) -> Result<LookupResult, Error> {
        let page = self
            .http
            .get(&self.config.lookup_url)
            .send()
            .await
            .map_err(|e| Error::Http(format!("lookup form fetch: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Http(format!("lookup form fetch: {}", e)))?
            .text()
            .await
            .map_err(|e| Error::Http(format!("lookup form fetch: {}", e)))?;

        if !has_form(&page) {
            return Err(Error::LookupFailed("no form on lookup page".to_string()));
        }

        let mut fields = parse_hidden_fields(&page);
        fields.push(("Address".to_string(), address.street.clone()));
        fields.push(("City".to_string(), address.city.clone()));
        fields.push(("Zip".to_string(), address.zip.clone()));
        fields.push(("Submit".to_string(), "Submit".to_string()));

        let response = self
            .http
            .post(&self.config.lookup_url)
            .form(&fields)
            .send()
            .await
            .map_err(|e| Error::Http(format!("lookup submit: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Http(format!("lookup submit: {}", e)))?
            .text()
            .await
            .map_err(|e| Error::Http(format!("lookup submit: {}", e)))?;

        Ok(parse_lookup_response(&response))
    }
}

/// Collapse a session outcome for callers: any step failure becomes `None`,
/// a completed session passes through even when both sides are absent.
fn collapse_session(outcome: Result<LookupResult, Error>) -> Option<LookupResult> {
    match outcome {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!("address lookup failed: {}", e);
            None
        }
    }
}

fn has_form(html: &str) -> bool {
    let document = Html::parse_document(html);
    let selector = Selector::parse("form").expect("invalid selector");
    document.select(&selector).next().is_some()
}

/// Extract `(name, value)` pairs from the page's hidden inputs, in document
/// order. Unnamed inputs are skipped; a missing value attribute echoes as
/// the empty string.
pub(crate) fn parse_hidden_fields(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[type="hidden"]"#).expect("invalid selector");

    document
        .select(&selector)
        .filter_map(|input| {
            let name = input.value().attr("name")?.trim();
            if name.is_empty() {
                return None;
            }
            let value = input.value().attr("value").unwrap_or("");
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_PAGE: &str = r#"
        <html><body>
        <form method="post" action="/legislookup/default">
            <input type="hidden" name="__VIEWSTATE" value="abc123" />
            <input type="hidden" name="__EVENTVALIDATION" value="def456" />
            <input type="hidden" name="" value="ignored" />
            <input type="hidden" value="nameless" />
            <input type="text" name="Address" />
        </form>
        </body></html>
    "#;

    #[test]
    fn test_hidden_fields_extracted_in_order() {
        let fields = parse_hidden_fields(FORM_PAGE);
        assert_eq!(
            fields,
            vec![
                ("__VIEWSTATE".to_string(), "abc123".to_string()),
                ("__EVENTVALIDATION".to_string(), "def456".to_string()),
            ]
        );
    }

    #[test]
    fn test_hidden_field_missing_value_echoes_empty() {
        let html = r#"<form><input type="hidden" name="Token" /></form>"#;
        let fields = parse_hidden_fields(html);
        assert_eq!(fields, vec![("Token".to_string(), String::new())]);
    }

    #[test]
    fn test_has_form() {
        assert!(has_form(FORM_PAGE));
        assert!(!has_form("<html><body><p>Maintenance in progress.</p></body></html>"));
    }

    #[test]
    fn test_resolver_config_from_app_config() {
        let app = AppConfig { timeout_ms: 3_000, ..Default::default() };
        let config = ResolverConfig::from(&app);
        assert_eq!(config.lookup_url, app.lookup_url);
        assert_eq!(config.timeout, Duration::from_millis(3_000));
    }

    #[test]
    fn test_resolver_new() {
        let resolver = AddressResolver::new(ResolverConfig::from(&AppConfig::default()));
        assert!(resolver.is_ok());
    }

    #[test]
    fn test_completed_session_with_no_matches_is_not_a_failure() {
        let result = collapse_session(Ok(LookupResult::default()));
        assert_eq!(result, Some(LookupResult::default()));
    }

    #[test]
    fn test_session_failure_collapses_to_none() {
        assert_eq!(collapse_session(Err(Error::LookupFailed("no form on lookup page".to_string()))), None);
        assert_eq!(collapse_session(Err(Error::Http("connection refused".to_string()))), None);
    }

    #[test]
    fn test_partial_match_passes_through() {
        let partial = parse_lookup_response("Senatorial district MO009 - Senator Jane Doe");
        let result = collapse_session(Ok(partial)).unwrap();
        assert!(result.senator.is_some());
        assert!(result.representative.is_none());
    }
}
