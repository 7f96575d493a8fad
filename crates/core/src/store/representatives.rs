//! Representative upsert and query operations.
//!
//! Records are keyed by canonical district code; padded and unpadded
//! lookup variants resolve to the same row. A sync run never deletes:
//! officials who leave office persist as stale rows until explicitly
//! pruned (known limitation of the reconciler, by contract).

use super::connection::StoreDb;
use crate::Error;
use crate::model::{Representative, district};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Keep the stored value unless the fresh parse produced a non-empty one.
fn prefer_non_empty(fresh: Option<String>, stored: Option<String>) -> Option<String> {
    match fresh {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => stored,
    }
}

fn row_to_rep(row: &rusqlite::Row<'_>) -> Result<Representative, rusqlite::Error> {
    Ok(Representative {
        district: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        party: row.get(3)?,
        city: row.get(4)?,
        phone: row.get(5)?,
        room: row.get(6)?,
    })
}

impl StoreDb {
    /// Upsert a batch of representatives keyed by canonical district.
    ///
    /// Districts that fail to canonicalize are skipped. On update, only
    /// non-empty parsed fields overwrite stored values; a field the fresh
    /// parse failed to extract never regresses a known-good value to blank.
    /// `updated` counts every matched record, changed or not. The whole
    /// batch runs in one transaction. A unique constraint violation on
    /// insert skips that record and continues.
    ///
    /// Returns `(added, updated)` counts.
    pub async fn upsert_representatives(&self, reps: Vec<Representative>) -> Result<(u64, u64), Error> {
        self.conn
            .call(move |conn| -> Result<(u64, u64), Error> {
                let tx = conn.transaction().map_err(Error::from)?;
                let mut added: u64 = 0;
                let mut updated: u64 = 0;
                let now = chrono::Utc::now().to_rfc3339();

                for rep in reps {
                    let Some(canonical) = district::canonicalize(&rep.district) else {
                        tracing::warn!(district = %rep.district, "skipping representative with non-numeric district");
                        continue;
                    };

                    let existing = tx.query_row(
                        "SELECT district, first_name, last_name, party, city, phone, room
                         FROM representatives WHERE district = ?1",
                        params![canonical],
                        row_to_rep,
                    );

                    match existing {
                        Ok(stored) => {
                            let merged = Representative {
                                district: canonical.clone(),
                                first_name: prefer_non_empty(rep.first_name, stored.first_name),
                                last_name: prefer_non_empty(rep.last_name, stored.last_name),
                                party: prefer_non_empty(rep.party, stored.party),
                                city: prefer_non_empty(rep.city, stored.city),
                                phone: prefer_non_empty(rep.phone, stored.phone),
                                room: prefer_non_empty(rep.room, stored.room),
                            };
                            tx.execute(
                                "UPDATE representatives SET
                                    first_name = ?2, last_name = ?3, party = ?4,
                                    city = ?5, phone = ?6, room = ?7, updated_at = ?8
                                 WHERE district = ?1",
                                params![
                                    canonical,
                                    merged.first_name,
                                    merged.last_name,
                                    merged.party,
                                    merged.city,
                                    merged.phone,
                                    merged.room,
                                    now,
                                ],
                            )
                            .map_err(Error::from)?;
                            updated += 1;
                        }
                        Err(rusqlite::Error::QueryReturnedNoRows) => {
                            let inserted = tx.execute(
                                "INSERT INTO representatives
                                    (district, first_name, last_name, party, city, phone, room, updated_at)
                                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                                params![
                                    canonical,
                                    rep.first_name,
                                    rep.last_name,
                                    rep.party,
                                    rep.city,
                                    rep.phone,
                                    rep.room,
                                    now,
                                ],
                            );
                            match inserted {
                                Ok(_) => added += 1,
                                Err(rusqlite::Error::SqliteFailure(e, msg))
                                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                                {
                                    tracing::warn!(
                                        district = %canonical,
                                        error = ?msg,
                                        "skipping representative insert on unique-key conflict"
                                    );
                                }
                                Err(e) => return Err(e.into()),
                            }
                        }
                        Err(e) => return Err(e.into()),
                    }
                }

                tx.commit().map_err(Error::from)?;
                Ok((added, updated))
            })
            .await
            .map_err(Error::from)
    }

    /// Look up a representative by district, accepting padded or unpadded
    /// variants ("7", "07", and "007" all hit the same row).
    pub async fn get_representative_by_district(&self, raw: &str) -> Result<Option<Representative>, Error> {
        let Some(canonical) = district::canonicalize(raw) else {
            return Ok(None);
        };
        self.conn
            .call(move |conn| -> Result<Option<Representative>, Error> {
                let result = conn.query_row(
                    "SELECT district, first_name, last_name, party, city, phone, room
                     FROM representatives WHERE district = ?1",
                    params![canonical],
                    row_to_rep,
                );
                match result {
                    Ok(r) => Ok(Some(r)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// All stored representatives, ordered by district.
    pub async fn list_representatives(&self) -> Result<Vec<Representative>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<Representative>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT district, first_name, last_name, party, city, phone, room
                     FROM representatives ORDER BY district",
                )?;
                let rows = stmt.query_map([], row_to_rep)?.collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored representatives.
    pub async fn count_representatives(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM representatives", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rep(district: &str, last: &str) -> Representative {
        Representative {
            district: district.to_string(),
            first_name: Some("Dana".to_string()),
            last_name: Some(last.to_string()),
            party: Some("R".to_string()),
            city: Some("Jefferson City".to_string()),
            phone: Some("573-751-0000".to_string()),
            room: Some("201".to_string()),
        }
    }

    #[tokio::test]
    async fn test_district_variants_hit_same_record() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_representatives(vec![make_rep("7", "Griffith")]).await.unwrap();

        for variant in ["7", "07", "007"] {
            let rep = db.get_representative_by_district(variant).await.unwrap().unwrap();
            assert_eq!(rep.district, "007");
            assert_eq!(rep.last_name.as_deref(), Some("Griffith"));
        }
        assert_eq!(db.count_representatives().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_padded_and_unpadded_writes_reconcile() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_representatives(vec![make_rep("07", "Griffith")]).await.unwrap();
        let (added, updated) = db.upsert_representatives(vec![make_rep("7", "Griffith")]).await.unwrap();

        assert_eq!(added, 0);
        assert_eq!(updated, 1, "padded and unpadded variants must hit the same row");
        assert_eq!(db.count_representatives().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_roster_sync_idempotent() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let batch = vec![make_rep("58", "Griffith"), make_rep("80", "Merideth")];

        let (added_first, _) = db.upsert_representatives(batch.clone()).await.unwrap();
        let (added_second, updated_second) = db.upsert_representatives(batch).await.unwrap();

        assert_eq!(added_first, 2);
        assert_eq!(added_second, 0);
        assert_eq!(updated_second, 2);
        assert_eq!(db.count_representatives().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_rescrape_preserves_known_fields() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_representatives(vec![make_rep("36", "Sharp")]).await.unwrap();

        // A degraded parse that only recovered the district and last name.
        let degraded = Representative {
            district: "036".to_string(),
            first_name: None,
            last_name: Some("Sharp".to_string()),
            party: None,
            city: Some(String::new()),
            phone: None,
            room: None,
        };
        db.upsert_representatives(vec![degraded]).await.unwrap();

        let stored = db.get_representative_by_district("36").await.unwrap().unwrap();
        assert_eq!(stored.first_name.as_deref(), Some("Dana"));
        assert_eq!(stored.party.as_deref(), Some("R"));
        assert_eq!(stored.city.as_deref(), Some("Jefferson City"));
        assert_eq!(stored.phone.as_deref(), Some("573-751-0000"));
    }

    #[tokio::test]
    async fn test_non_numeric_district_skipped() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let (added, updated) = db
            .upsert_representatives(vec![make_rep("Vacant", "Nobody"), make_rep("12", "Lee")])
            .await
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(updated, 0);
        assert!(db.get_representative_by_district("12").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sync_never_deletes_absent_districts() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_representatives(vec![make_rep("1", "Old"), make_rep("2", "Current")])
            .await
            .unwrap();

        // District 1 absent from the fresh scrape; it must persist.
        db.upsert_representatives(vec![make_rep("2", "Current")]).await.unwrap();

        assert_eq!(db.count_representatives().await.unwrap(), 2);
        assert!(db.get_representative_by_district("1").await.unwrap().is_some());
    }
}
