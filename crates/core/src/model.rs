//! Legislative data model.
//!
//! Records scraped from the origin site are ephemeral per round trip; the
//! durable copies live in [`crate::store`]. Lookup results are transient and
//! never persisted by this subsystem.

use serde::{Deserialize, Serialize};

/// A legislative bill as scraped from the bill-listing page.
///
/// Uniqueness is enforced on `number` (`HB<n>` or `SB<n>`). Detail
/// enrichment lives in [`BillDetail`] and is fetched lazily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub number: String,
    pub sponsor: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub last_action: String,
}

/// One entry from a bill's action history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAction {
    pub date: String,
    pub journal: String,
    pub description: String,
}

/// Document links discovered on a bill's content page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDocuments {
    pub text_pdf_url: Option<String>,
    pub summary_pdf_url: Option<String>,
}

/// Lazily-fetched enrichment for a single bill.
///
/// Every part is best-effort: a failed fetch of one source leaves the
/// others intact, so any subset of fields may be populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDetail {
    pub actions: Vec<BillAction>,
    pub hearing_status: Option<String>,
    pub documents: BillDocuments,
    pub cosponsors: Vec<String>,
    pub fetched_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An elected representative keyed by canonical district code.
///
/// All fields other than the district are optional because either roster
/// layout may fail to yield them; reconciliation never regresses a stored
/// non-empty field to blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    pub district: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub party: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub room: Option<String>,
}

/// One side of an address lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Official {
    pub name: String,
    pub district: String,
    pub party: Option<String>,
}

/// Result of resolving a citizen's address to their officials.
///
/// Either side may be absent when the origin site's phrasing fails to
/// match; both absent still counts as a successful lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub senator: Option<Official>,
    pub representative: Option<Official>,
}

impl LookupResult {
    /// True when neither side of the lookup matched.
    pub fn is_empty(&self) -> bool {
        self.senator.is_none() && self.representative.is_none()
    }
}

pub mod district {
    //! District code normalization.
    //!
    //! The canonical stored form is a fixed-width numeric string
    //! (zero-padded to three digits). Scrapes and lookups may present
    //! unpadded or partially padded variants; all of them must resolve to
    //! the same durable record.

    /// Canonical padding width for district codes.
    pub const WIDTH: usize = 3;

    /// Canonicalize a district token to the padded stored form.
    ///
    /// Returns `None` for empty or non-numeric input, and for tokens
    /// longer than the canonical width.
    pub fn canonicalize(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let unpadded = trimmed.trim_start_matches('0');
        // All-zero input ("000") is not a valid district.
        if unpadded.is_empty() || unpadded.len() > WIDTH {
            return None;
        }
        Some(format!("{unpadded:0>WIDTH$}"))
    }

    /// Unpadded display form of a district token.
    pub fn display(raw: &str) -> String {
        let trimmed = raw.trim().trim_start_matches('0');
        if trimmed.is_empty() { raw.trim().to_string() } else { trimmed.to_string() }
    }
}
