//! Lookup-response parser.
//!
//! The lookup endpoint answers a form submission with free text, not
//! structured HTML. Officials are extracted by matching known phrasings;
//! a phrasing miss leaves that side of the result absent rather than
//! failing the lookup.

use std::sync::LazyLock;

use regex::Regex;

use legisync_core::model::{LookupResult, Official, district};

/// Primary phrasing: "Senatorial district MO009 - Senator Jane Doe (D)".
static SENATOR_DISTRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)senatorial\s+district\s+(?:MO)?\s*(\d+)\s*-\s*senator\s+([^\r\n(]+?)(?:\s*\(([^)]+)\))?\s*$")
        .expect("invalid regex")
});

/// Primary phrasing: "Legislative district MO058 - Representative Dave Griffith (R)".
static REPRESENTATIVE_DISTRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)legislative\s+district\s+(?:MO)?\s*(\d+)\s*-\s*representative\s+([^\r\n(]+?)(?:\s*\(([^)]+)\))?\s*$",
    )
    .expect("invalid regex")
});

/// Prose fallback pieces, scanned per line: "Senator Jane Doe ... District 9 ... (D)".
static PROSE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Senator|Representative)\s+(.*?)(?:\s+\(|$)").expect("invalid regex"));
static PROSE_DISTRICT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)district\s+(\d+)").expect("invalid regex"));
static PROSE_PARTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("invalid regex"));

/// Parse the free-text lookup response into officials.
///
/// Districts come back unpadded ("MO009" yields "9"). Either side is
/// `None` when no phrasing matches; this never fails outright.
pub fn parse_lookup_response(text: &str) -> LookupResult {
    LookupResult {
        senator: match_phrasing(text, &SENATOR_DISTRICT).or_else(|| match_prose(text, "Senator")),
        representative: match_phrasing(text, &REPRESENTATIVE_DISTRICT).or_else(|| match_prose(text, "Representative")),
    }
}

fn match_phrasing(text: &str, pattern: &Regex) -> Option<Official> {
    let captures = pattern.captures(text)?;
    let district = district::display(captures.get(1)?.as_str());
    let name = captures.get(2)?.as_str().trim().to_string();
    if name.is_empty() {
        return None;
    }
    let party = captures.get(3).map(|m| m.as_str().trim().to_string());
    Some(Official { name, district, party })
}

/// Line-by-line prose scan used when the dashed phrasing is absent.
///
/// "Senatorial" contains "Senator", so lines that already carry the
/// dashed phrasing are skipped to avoid re-matching them here.
fn match_prose(text: &str, title: &str) -> Option<Official> {
    for line in text.lines() {
        if !line.contains(title) {
            continue;
        }
        let lower = line.to_ascii_lowercase();
        if lower.contains("senatorial district") || lower.contains("legislative district") {
            continue;
        }

        let name = PROSE_NAME
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|n| !n.is_empty());
        let district = PROSE_DISTRICT
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| district::display(m.as_str()));

        if let (Some(name), Some(district)) = (name, district) {
            let party = PROSE_PARTY
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string());
            return Some(Official { name, district, party });
        }
    }
    None
}
