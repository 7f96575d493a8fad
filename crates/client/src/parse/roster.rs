//! Representative roster parsers.
//!
//! Two independent markup shapes carry the same logical data: the member
//! roster page (preferred) and the member grid page (fallback, used when
//! the roster parse yields zero records). The roster layout varies by
//! session so its parser scans heuristically; the grid layout is stable
//! with eight fixed columns.

use super::non_empty;
use legisync_core::model::Representative;

/// Party codes the roster heuristic recognizes as a standalone cell.
const PARTY_CODES: [&str; 3] = ["R", "D", "I"];

/// Parse the member roster page (primary source).
///
/// A row qualifies when it has at least five cells and one of them is a
/// purely numeric district token. Party is a nearby single-letter code,
/// the name comes from a `Last, First` cell, and city/phone/room are
/// guessed from the row tail when the row is wide enough. Rows without a
/// district or any name part are skipped.
pub fn parse_member_roster(html: &str) -> Vec<Representative> {
    let rows = super::table_rows(html);
    let mut reps = Vec::new();

    for cells in &rows {
        if cells.len() < 5 {
            continue;
        }

        let mut district = None;
        let mut party = None;
        let mut first_name = None;
        let mut last_name = None;

        for (i, value) in cells.iter().enumerate() {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            district = Some(value.clone());

            // Party tends to sit next to the district column.
            let lo = i.saturating_sub(3);
            let hi = (i + 4).min(cells.len());
            party = cells[lo..hi]
                .iter()
                .find(|n| PARTY_CODES.contains(&n.as_str()))
                .cloned();

            // Roster names render as "Last, First" in a single cell.
            for cell in cells {
                let mut parts = cell.splitn(2, ',');
                if let (Some(last), Some(first)) = (parts.next(), parts.next())
                    && !last.trim().is_empty()
                    && !first.trim().is_empty()
                    && !first.contains(',')
                {
                    last_name = Some(last.trim().to_string());
                    first_name = Some(first.trim().to_string());
                    break;
                }
            }
            break;
        }

        // Wide rows carry city/phone/room at the tail, grid-style.
        let (city, phone, room) = if cells.len() >= 8 {
            let tail_city = cells[cells.len() - 3].clone();
            (
                if tail_city.len() > 2 { Some(tail_city) } else { None },
                non_empty(&cells[cells.len() - 2]),
                non_empty(&cells[cells.len() - 1]),
            )
        } else {
            (None, None, None)
        };

        if let Some(district) = district
            && (first_name.is_some() || last_name.is_some())
        {
            reps.push(Representative { district, first_name, last_name, party, city, phone, room });
        }
    }

    reps
}

/// Parse the member grid page (fallback source, eight fixed columns).
///
/// Column order: `[_, last, first, district, party, city, phone, room]`.
/// Requires non-empty names and a purely numeric district; the "Vacant"
/// placeholder row is excluded.
pub fn parse_member_grid(html: &str) -> Vec<Representative> {
    let rows = super::table_rows(html);
    let mut reps = Vec::new();

    for cells in &rows {
        if cells.len() < 8 {
            continue;
        }

        let last_name = cells[1].trim();
        let first_name = cells[2].trim();
        let district = cells[3].trim();

        if last_name.is_empty()
            || first_name.is_empty()
            || last_name == "Vacant"
            || district.is_empty()
            || !district.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }

        reps.push(Representative {
            district: district.to_string(),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            party: non_empty(&cells[4]),
            city: non_empty(&cells[5]),
            phone: non_empty(&cells[6]),
            room: non_empty(&cells[7]),
        });
    }

    reps
}
