//! Per-bill detail page parsers: action history, hearing status, and
//! document links.
//!
//! Detail enrichment is best-effort and additive; each parser tolerates
//! markup it doesn't recognize by returning less.

use scraper::{Html, Selector};

use super::{non_empty, table_rows, truncate_chars, visible_text};
use legisync_core::model::{BillAction, BillDocuments};

/// Hearing phrasings the origin site uses, longest first so that
/// "not scheduled" wins over its "scheduled" suffix.
const HEARING_VOCABULARY: [&str; 4] = ["not scheduled", "scheduled", "cancelled", "canceled"];

/// Sentence length cap for the extracted hearing status.
const STATUS_MAX_CHARS: usize = 200;

/// Parse a bill's action history table into dated entries.
///
/// Rows are `[date, journal, description]`, or `[date, description]` on
/// pages that omit the journal column. Rows with an empty date or
/// description are dropped, as are rows whose date cell is a header label
/// (anything not starting with a digit).
pub fn parse_bill_actions(html: &str) -> Vec<BillAction> {
    let rows = table_rows(html);
    let mut actions = Vec::new();

    for cells in &rows {
        if cells.len() < 2 {
            continue;
        }

        let date = cells[0].trim();
        let (journal, description) = if cells.len() >= 3 {
            (cells[1].trim(), cells[2].trim())
        } else {
            ("", cells[1].trim())
        };

        if date.is_empty() || description.is_empty() {
            continue;
        }
        if !date.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }

        actions.push(BillAction {
            date: date.to_string(),
            journal: journal.to_string(),
            description: description.to_string(),
        });
    }

    actions
}

/// Derive a hearing status from the page's visible text.
///
/// Scans for a fixed vocabulary and returns the containing sentence,
/// truncated to 200 characters, or the raw prefix when no sentence
/// boundary exists. Returns `None` when no vocabulary term is present.
pub fn parse_hearing_status(html: &str) -> Option<String> {
    let text = visible_text(html);
    let lower = text.to_ascii_lowercase();

    for term in HEARING_VOCABULARY {
        let Some(pos) = lower.find(term) else {
            continue;
        };

        let start = text[..pos].rfind(['.', '!', '?']).map(|i| i + 1).unwrap_or(0);
        let end = text[pos..]
            .find(['.', '!', '?'])
            .map(|i| pos + i + 1)
            .unwrap_or(text.len());

        return Some(truncate_chars(text[start..end].trim(), STATUS_MAX_CHARS));
    }

    None
}

/// Find the bill-text and summary PDF links on a bill content page.
///
/// Relative hrefs are absolutized against the documents host.
pub fn parse_document_links(html: &str, documents_base: &str) -> BillDocuments {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("invalid selector");

    let mut documents = BillDocuments::default();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href_lower = href.to_ascii_lowercase();
        if !href_lower.ends_with(".pdf") {
            continue;
        }

        let link_text = element.text().collect::<Vec<_>>().join(" ").trim().to_ascii_lowercase();

        if documents.text_pdf_url.is_none()
            && (href_lower.contains("hlrbillspdf") || href_lower.contains("/billtracking/bills"))
        {
            documents.text_pdf_url = Some(absolutize(href, documents_base));
        }

        if documents.summary_pdf_url.is_none()
            && (href_lower.contains("/sumpdf/") || link_text.contains("summary"))
        {
            documents.summary_pdf_url = Some(absolutize(href, documents_base));
        }

        if documents.text_pdf_url.is_some() && documents.summary_pdf_url.is_some() {
            break;
        }
    }

    documents
}

/// Collect co-sponsor names from member links, deduplicated in document
/// order.
pub fn parse_cosponsors(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").expect("invalid selector");

    let mut names = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.to_ascii_lowercase().contains("member") {
            continue;
        }

        let Some(name) = non_empty(&element.text().collect::<Vec<_>>().join(" ")) else {
            continue;
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

fn absolutize(href: &str, documents_base: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{documents_base}{href}")
    } else {
        format!("{documents_base}/{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCS_BASE: &str = "https://documents.example.gov";

    #[test]
    fn test_actions_parsed_from_three_column_table() {
        let html = "<table>\
            <tr><td>Date</td><td>Journal</td><td>Description</td></tr>\
            <tr><td>01/15/2025</td><td>H23</td><td>Read first time</td></tr>\
            <tr><td>01/16/2025</td><td>H24</td><td>Read second time</td></tr>\
        </table>";
        let actions = parse_bill_actions(html);

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].date, "01/15/2025");
        assert_eq!(actions[0].journal, "H23");
        assert_eq!(actions[0].description, "Read first time");
    }

    #[test]
    fn test_actions_header_row_discarded() {
        let html = "<table><tr><td>Date</td><td>J</td><td>Something</td></tr></table>";
        assert!(parse_bill_actions(html).is_empty());
    }

    #[test]
    fn test_actions_empty_cells_discarded() {
        let html = "<table>\
            <tr><td>01/15/2025</td><td>H23</td><td></td></tr>\
            <tr><td></td><td>H24</td><td>Orphan description</td></tr>\
        </table>";
        assert!(parse_bill_actions(html).is_empty());
    }

    #[test]
    fn test_actions_two_column_variant() {
        let html = "<table><tr><td>01/15/2025</td><td>Read first time</td></tr></table>";
        let actions = parse_bill_actions(html);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].journal, "");
        assert_eq!(actions[0].description, "Read first time");
    }

    #[test]
    fn test_hearing_status_returns_containing_sentence() {
        let html = "<p>Referred to committee. The hearing is scheduled for June 4. More text.</p>";
        let status = parse_hearing_status(html).unwrap();
        assert_eq!(status, "The hearing is scheduled for June 4.");
    }

    #[test]
    fn test_hearing_not_scheduled_wins_over_scheduled() {
        let html = "<p>Hearing not scheduled at this time.</p>";
        let status = parse_hearing_status(html).unwrap();
        assert!(status.contains("not scheduled"));
    }

    #[test]
    fn test_hearing_both_spellings_of_cancelled() {
        for spelling in ["cancelled", "canceled"] {
            let html = format!("<p>The hearing was {spelling}.</p>");
            assert!(parse_hearing_status(&html).is_some(), "missed {spelling}");
        }
    }

    #[test]
    fn test_hearing_no_sentence_boundary_uses_prefix() {
        let body = format!("hearing scheduled {}", "y".repeat(400));
        let html = format!("<p>{body}</p>");
        let status = parse_hearing_status(&html).unwrap();
        assert_eq!(status.chars().count(), 200);
    }

    #[test]
    fn test_hearing_absent_vocabulary() {
        assert!(parse_hearing_status("<p>Nothing of note here.</p>").is_none());
    }

    #[test]
    fn test_hearing_ignores_script_text() {
        let html = "<script>var s = 'scheduled';</script><p>No news.</p>";
        assert!(parse_hearing_status(html).is_none());
    }

    #[test]
    fn test_document_links_absolute_and_relative() {
        let html = r#"
            <a href="https://documents.example.gov/hlrbillspdf/0101H.pdf">Bill Text</a>
            <a href="/sumpdf/0101S.pdf">Summary</a>
        "#;
        let docs = parse_document_links(html, DOCS_BASE);

        assert_eq!(
            docs.text_pdf_url.as_deref(),
            Some("https://documents.example.gov/hlrbillspdf/0101H.pdf")
        );
        assert_eq!(
            docs.summary_pdf_url.as_deref(),
            Some("https://documents.example.gov/sumpdf/0101S.pdf")
        );
    }

    #[test]
    fn test_document_links_summary_by_link_text() {
        let html = r#"<a href="/files/0101.pdf">Bill Summary</a>"#;
        let docs = parse_document_links(html, DOCS_BASE);
        assert_eq!(docs.summary_pdf_url.as_deref(), Some("https://documents.example.gov/files/0101.pdf"));
        assert!(docs.text_pdf_url.is_none());
    }

    #[test]
    fn test_document_links_ignores_non_pdf() {
        let html = r#"<a href="/billtracking/bills/hb101.html">HB101</a>"#;
        let docs = parse_document_links(html, DOCS_BASE);
        assert!(docs.text_pdf_url.is_none());
        assert!(docs.summary_pdf_url.is_none());
    }

    #[test]
    fn test_cosponsors_from_member_links() {
        let html = r#"
            <a href="/MemberDetails.aspx?district=58">Griffith, Dave</a>
            <a href="/MemberDetails.aspx?district=80">Merideth, Peter</a>
            <a href="/MemberDetails.aspx?district=58">Griffith, Dave</a>
            <a href="/BillList.aspx">Back to list</a>
        "#;
        let names = parse_cosponsors(html);

        assert_eq!(names, vec!["Griffith, Dave".to_string(), "Merideth, Peter".to_string()]);
    }

    #[test]
    fn test_cosponsors_empty_page() {
        assert!(parse_cosponsors("<p>No co-sponsors.</p>").is_empty());
    }
}
