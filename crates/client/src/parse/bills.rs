//! Bill list parser.
//!
//! The listing page renders each bill as two consecutive table rows:
//! row N carries `(bill number, sponsor)` and row N+1 carries the
//! description. The walk uses a fixed stride of two so a rejected pair
//! never shifts the alignment of the pairs that follow it.

use std::sync::LazyLock;

use regex::Regex;

use super::{table_rows, truncate_chars};
use legisync_core::model::Bill;

/// Bill numbers are a chamber prefix plus digits, with optional interior
/// whitespace ("HB101", "HB 101").
static BILL_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:HB|SB)\s*\d+$").expect("invalid regex"));

/// Titles are the description truncated to this many characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Accept at most this many bills per listing page.
pub const MAX_BILLS_PER_PAGE: usize = 100;

/// Parse the bill-listing page into structured records, document order.
///
/// A pair is accepted only if row N has at least two cells, row N+1 has at
/// least one, and the first cell of row N matches the bill-number pattern.
/// Everything else (header rows, decorative rows, stray markup) is skipped
/// silently.
pub fn parse_bill_list(html: &str) -> Vec<Bill> {
    let rows = table_rows(html);
    let mut bills = Vec::new();

    let mut i = 0;
    while i + 1 < rows.len() {
        let first = &rows[i];
        let second = &rows[i + 1];
        i += 2;

        if first.len() < 2 || second.is_empty() {
            continue;
        }

        let number = first[0].trim();
        if number.is_empty() || !BILL_NUMBER.is_match(number) {
            continue;
        }

        let sponsor = if first[1].trim().is_empty() { "Unknown".to_string() } else { first[1].trim().to_string() };
        let description = second[0].trim().to_string();

        bills.push(Bill {
            number: number.to_string(),
            sponsor,
            title: truncate_chars(&description, TITLE_MAX_CHARS),
            description,
            status: "Active".to_string(),
            last_action: "Filed".to_string(),
        });

        if bills.len() >= MAX_BILLS_PER_PAGE {
            break;
        }
    }

    bills
}
