//! Bill upsert and query operations.
//!
//! The bill reconciler owns the durable copy of every scraped bill.
//! Batches are applied in a single transaction: either the whole sync run
//! lands or none of it does.

use super::connection::StoreDb;
use crate::Error;
use crate::model::Bill;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

fn row_to_bill(row: &rusqlite::Row<'_>) -> Result<Bill, rusqlite::Error> {
    Ok(Bill {
        number: row.get(0)?,
        sponsor: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        last_action: row.get(5)?,
    })
}

impl StoreDb {
    /// Upsert a batch of bills keyed by bill number.
    ///
    /// New numbers are inserted, existing ones overwritten; `updated`
    /// counts every matched record, changed or not, so a re-run over
    /// identical data reports all records as updated. The whole batch runs
    /// in one transaction; a failure rolls everything back. A unique
    /// constraint violation on a single insert (a concurrent writer won
    /// the race) skips that record and continues the batch.
    ///
    /// Returns `(added, updated)` counts.
    pub async fn upsert_bills(&self, bills: Vec<Bill>) -> Result<(u64, u64), Error> {
        self.conn
            .call(move |conn| -> Result<(u64, u64), Error> {
                let tx = conn.transaction().map_err(Error::from)?;
                let mut added: u64 = 0;
                let mut updated: u64 = 0;
                let now = chrono::Utc::now().to_rfc3339();

                for bill in &bills {
                    let existing = tx.query_row(
                        "SELECT bill_number, sponsor, title, description, status, last_action
                         FROM bills WHERE bill_number = ?1",
                        params![bill.number],
                        row_to_bill,
                    );

                    match existing {
                        Ok(_) => {
                            tx.execute(
                                "UPDATE bills SET
                                    sponsor = ?2, title = ?3, description = ?4,
                                    status = ?5, last_action = ?6, updated_at = ?7
                                 WHERE bill_number = ?1",
                                params![
                                    bill.number,
                                    bill.sponsor,
                                    bill.title,
                                    bill.description,
                                    bill.status,
                                    bill.last_action,
                                    now,
                                ],
                            )
                            .map_err(Error::from)?;
                            updated += 1;
                        }
                        Err(rusqlite::Error::QueryReturnedNoRows) => {
                            let inserted = tx.execute(
                                "INSERT INTO bills
                                    (bill_number, sponsor, title, description, status, last_action, updated_at)
                                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                                params![
                                    bill.number,
                                    bill.sponsor,
                                    bill.title,
                                    bill.description,
                                    bill.status,
                                    bill.last_action,
                                    now,
                                ],
                            );
                            match inserted {
                                Ok(_) => added += 1,
                                Err(rusqlite::Error::SqliteFailure(e, msg))
                                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                                {
                                    tracing::warn!(
                                        bill_number = %bill.number,
                                        error = ?msg,
                                        "skipping bill insert on unique-key conflict"
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

    /// All stored bills, ordered by bill number.
    pub async fn list_bills(&self) -> Result<Vec<Bill>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<Bill>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT bill_number, sponsor, title, description, status, last_action
                     FROM bills ORDER BY bill_number",
                )?;
                let rows = stmt.query_map([], row_to_bill)?.collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(Error::from)
    }

    /// Get a bill by its number.
    ///
    /// Returns None if the number is not stored.
    pub async fn get_bill(&self, number: &str) -> Result<Option<Bill>, Error> {
        let number = number.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Bill>, Error> {
                let result = conn.query_row(
                    "SELECT bill_number, sponsor, title, description, status, last_action
                     FROM bills WHERE bill_number = ?1",
                    params![number],
                    row_to_bill,
                );
                match result {
                    Ok(b) => Ok(Some(b)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored bills.
    pub async fn count_bills(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM bills", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bill(number: &str, sponsor: &str) -> Bill {
        Bill {
            number: number.to_string(),
            sponsor: sponsor.to_string(),
            title: format!("An act about {number}"),
            description: format!("A longer description of {number}"),
            status: "Active".to_string(),
            last_action: "Filed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_bills() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let (added, updated) = db
            .upsert_bills(vec![make_bill("HB101", "Rep. Smith"), make_bill("SB50", "Sen. Jones")])
            .await
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(updated, 0);
        assert_eq!(db.count_bills().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_upsert_updates_existing() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_bills(vec![make_bill("HB101", "Rep. Smith")]).await.unwrap();

        let (added, updated) = db.upsert_bills(vec![make_bill("HB101", "Rep. Garcia")]).await.unwrap();
        assert_eq!(added, 0);
        assert_eq!(updated, 1);

        let stored = db.get_bill("HB101").await.unwrap().unwrap();
        assert_eq!(stored.sponsor, "Rep. Garcia");
        assert_eq!(db.count_bills().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_second_identical_run_is_idempotent() {
        let db = StoreDb::open_in_memory().await.unwrap();
        let batch = vec![make_bill("HB101", "Rep. Smith"), make_bill("HB202", "Rep. Doe")];

        db.upsert_bills(batch.clone()).await.unwrap();
        let (added, updated) = db.upsert_bills(batch).await.unwrap();

        assert_eq!(added, 0);
        assert_eq!(updated, 2);
        assert_eq!(db.count_bills().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_bill() {
        let db = StoreDb::open_in_memory().await.unwrap();
        assert!(db.get_bill("HB999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_bills_ordered() {
        let db = StoreDb::open_in_memory().await.unwrap();
        db.upsert_bills(vec![make_bill("SB50", "b"), make_bill("HB101", "a")])
            .await
            .unwrap();

        let bills = db.list_bills().await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].number, "HB101");
        assert_eq!(bills[1].number, "SB50");
    }
}
