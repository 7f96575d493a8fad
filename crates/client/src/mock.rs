//! Deterministic fallback data.
//!
//! Served when live mode is off or every live source has failed. The
//! records are stable across calls so downstream consumers and tests can
//! rely on exact contents.

use legisync_core::model::{Bill, LookupResult, Official};

fn bill(number: &str, sponsor: &str, description: &str, status: &str, last_action: &str) -> Bill {
    Bill {
        number: number.to_string(),
        sponsor: sponsor.to_string(),
        title: description.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        last_action: last_action.to_string(),
    }
}

/// A fixed slate of eight bills across both chambers.
pub fn bills() -> Vec<Bill> {
    vec![
        bill(
            "HB 101",
            "Rep. John Smith",
            "An Act to Improve Education Funding",
            "In Committee",
            "Referred to Education Committee",
        ),
        bill(
            "HB 202",
            "Rep. Sarah Johnson",
            "An Act Relating to Transportation Infrastructure",
            "Active",
            "Second Read",
        ),
        bill(
            "SB 50",
            "Sen. Mike Davis",
            "An Act to Expand Healthcare Access",
            "In Committee",
            "Hearing Scheduled",
        ),
        bill(
            "HB 303",
            "Rep. Lisa Brown",
            "An Act Concerning Small Business Tax Relief",
            "Active",
            "First Read",
        ),
        bill(
            "SB 75",
            "Sen. Robert Wilson",
            "An Act to Protect Natural Resources",
            "In Committee",
            "Referred to Conservation Committee",
        ),
        bill(
            "HB 404",
            "Rep. Karen Miller",
            "An Act Relating to Public Safety Communications",
            "Active",
            "Filed",
        ),
        bill(
            "HB 505",
            "Rep. James Taylor",
            "An Act to Support Agricultural Development",
            "In Committee",
            "Hearing Completed",
        ),
        bill(
            "SB 100",
            "Sen. Patricia Moore",
            "An Act Concerning Veterans Services",
            "Active",
            "Third Read",
        ),
    ]
}

fn official(name: &str, district: &str, party: &str) -> Official {
    Official { name: name.to_string(), district: district.to_string(), party: Some(party.to_string()) }
}

/// Officials keyed by zip code, with a generic default for zips outside
/// the known set.
pub fn lookup_for_zip(zip: &str) -> LookupResult {
    match zip {
        "65101" => LookupResult {
            senator: Some(official("Mike Bernskoetter", "6", "Republican")),
            representative: Some(official("Dave Griffith", "58", "Republican")),
        },
        "63101" => LookupResult {
            senator: Some(official("Steve Roberts", "5", "Democrat")),
            representative: Some(official("Peter Merideth", "80", "Democrat")),
        },
        "64101" => LookupResult {
            senator: Some(official("Barbara Washington", "9", "Democrat")),
            representative: Some(official("Mark Sharp", "36", "Democrat")),
        },
        _ => LookupResult {
            senator: Some(official("Mock Senator", "1", "Independent")),
            representative: Some(official("Mock Representative", "1", "Independent")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bills_are_stable() {
        let first = bills();
        let second = bills();
        assert_eq!(first.len(), 8);
        assert_eq!(first[0].number, second[0].number);
        assert_eq!(first[0].number, "HB 101");
        assert_eq!(first[0].sponsor, "Rep. John Smith");
        assert_eq!(first[7].number, "SB 100");
    }

    #[test]
    fn test_bills_have_no_empty_fields() {
        for bill in bills() {
            assert!(!bill.number.is_empty());
            assert!(!bill.sponsor.is_empty());
            assert!(!bill.title.is_empty());
            assert!(!bill.status.is_empty());
            assert!(!bill.last_action.is_empty());
        }
    }

    #[test]
    fn test_known_zip() {
        let result = lookup_for_zip("65101");
        assert_eq!(result.senator.unwrap().name, "Mike Bernskoetter");
        let rep = result.representative.unwrap();
        assert_eq!(rep.name, "Dave Griffith");
        assert_eq!(rep.district, "58");
    }

    #[test]
    fn test_unknown_zip_gets_generic_officials() {
        let result = lookup_for_zip("00000");
        assert_eq!(result.senator.unwrap().name, "Mock Senator");
        assert_eq!(result.representative.unwrap().district, "1");
    }
}
