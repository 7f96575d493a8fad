//! Markup parsers tuned to the origin site's known layout.
//!
//! Every parser here is a pure function from raw markup to structured
//! records. The heuristics are positional (cell indexes, row pairing) and
//! textual (regex over cell text), versioned to the layout the origin site
//! currently serves; a layout change means replacing one parser, not its
//! callers. Malformed rows are skipped silently by design: listing pages
//! routinely interleave decorative and header rows with data rows.

pub mod bills;
pub mod detail;
pub mod lookup;
pub mod roster;

pub use bills::parse_bill_list;
pub use detail::{parse_bill_actions, parse_cosponsors, parse_document_links, parse_hearing_status};
pub use lookup::parse_lookup_response;
pub use roster::{parse_member_grid, parse_member_roster};

use scraper::{Html, Node, Selector};

/// Collect every `<tr>` in the document as a vector of trimmed cell texts.
///
/// Rows without `<td>` cells (header rows using `<th>`, spacer rows) come
/// back empty rather than being dropped, so positional pairing heuristics
/// see the same row sequence a browser renders.
pub(crate) fn table_rows(html: &str) -> Vec<Vec<String>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").expect("invalid selector");
    let cell_selector = Selector::parse("td").expect("invalid selector");

    document
        .select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| collapse_whitespace(&cell.text().collect::<Vec<_>>().join(" ")))
                .collect()
        })
        .collect()
}

/// Concatenated visible text of the document, whitespace-collapsed.
///
/// Skips `<script>` and `<style>` subtrees.
pub(crate) fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    let mut stack: Vec<_> = document.tree.root().children().collect();
    stack.reverse();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Element(el) => {
                let name = el.name();
                if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                    continue;
                }
            }
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            _ => {}
        }
        let mut children: Vec<_> = node.children().collect();
        children.reverse();
        stack.append(&mut children);
    }

    collapse_whitespace(&out)
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters on a char boundary.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// `Some(trimmed)` when the cell text is non-empty, `None` otherwise.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_keeps_header_rows_in_sequence() {
        let html = r#"
            <table>
                <tr><th>Header</th></tr>
                <tr><td>HB101</td><td>Rep. Smith</td></tr>
            </table>
        "#;
        let rows = table_rows(html);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["HB101".to_string(), "Rep. Smith".to_string()]);
    }

    #[test]
    fn test_table_rows_collapses_cell_whitespace() {
        let html = "<table><tr><td>  An   act\n  relating </td></tr></table>";
        let rows = table_rows(html);
        assert_eq!(rows[0][0], "An act relating");
    }

    #[test]
    fn test_visible_text_skips_scripts() {
        let html = "<body><script>var x = 1;</script><p>Hearing scheduled.</p></body>";
        let text = visible_text(html);
        assert!(text.contains("Hearing scheduled."));
        assert!(!text.contains("var x"));
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
    }
}
