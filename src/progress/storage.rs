//! Storage operations for learning progress
//!
//! One row per word, enforced by the `word` primary key. Rows are created
//! with `INSERT OR IGNORE` so seeding and interactive writes can race
//! without producing duplicates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::database::UserDatabase;
use super::models::{ProgressRecord, ReviewStats};
use crate::catalog::ReferenceCatalog;
use crate::error::{Result, StoreError};
use crate::review;

const COLUMNS: &str = "word, is_learned, last_reviewed_at, next_review_due_at, review_count";

pub struct ProgressStore {
    db: Arc<UserDatabase>,
    catalog: Arc<ReferenceCatalog>,
}

impl ProgressStore {
    pub fn new(db: Arc<UserDatabase>, catalog: Arc<ReferenceCatalog>) -> Self {
        Self { db, catalog }
    }

    // ==================== Reads ====================

    /// Progress for a known word; `None` if no row has been created yet.
    pub fn get(&self, word: &str) -> Result<Option<ProgressRecord>> {
        self.catalog.require(word)?;
        self.db.read(|conn| fetch(conn, word))
    }

    pub fn list_learned(&self) -> Result<Vec<ProgressRecord>> {
        self.query_records(
            &format!("SELECT {COLUMNS} FROM progress WHERE is_learned = 1 ORDER BY rowid"),
            &[],
        )
    }

    /// Learned words whose next review is at or before `now`, oldest first.
    pub fn list_due(&self, now: DateTime<Utc>) -> Result<Vec<ProgressRecord>> {
        self.query_records(
            &format!(
                "SELECT {COLUMNS} FROM progress
                 WHERE is_learned = 1
                   AND next_review_due_at IS NOT NULL
                   AND next_review_due_at <= ?1
                 ORDER BY next_review_due_at, rowid"
            ),
            &[now.timestamp_millis()],
        )
    }

    /// Learned words reviewed at or after `since`, most recent first.
    pub fn list_reviewed_since(&self, since: DateTime<Utc>) -> Result<Vec<ProgressRecord>> {
        self.query_records(
            &format!(
                "SELECT {COLUMNS} FROM progress
                 WHERE is_learned = 1 AND last_reviewed_at >= ?1
                 ORDER BY last_reviewed_at DESC, rowid"
            ),
            &[since.timestamp_millis()],
        )
    }

    /// Every row, ordered by word.
    pub fn list_all(&self) -> Result<Vec<ProgressRecord>> {
        self.query_records(&format!("SELECT {COLUMNS} FROM progress ORDER BY word"), &[])
    }

    pub fn count(&self) -> Result<usize> {
        self.db.read(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM progress", [], |row| row.get(0))?;
            Ok(count as usize)
        })
    }

    /// Learned/due/recent counts. `total_idioms` is left for the caller.
    pub fn stats(&self, now: DateTime<Utc>, recent_since: DateTime<Utc>) -> Result<ReviewStats> {
        self.db.read(|conn| {
            let (learned, due, recent): (i64, i64, i64) = conn.query_row(
                "SELECT
                    COALESCE(SUM(is_learned = 1), 0),
                    COALESCE(SUM(is_learned = 1 AND next_review_due_at IS NOT NULL AND next_review_due_at <= ?1), 0),
                    COALESCE(SUM(is_learned = 1 AND last_reviewed_at >= ?2), 0)
                 FROM progress",
                params![now.timestamp_millis(), recent_since.timestamp_millis()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            Ok(ReviewStats {
                total_idioms: 0,
                learned: learned as usize,
                due: due as usize,
                recently_reviewed: recent as usize,
            })
        })
    }

    // ==================== Writes ====================

    /// Apply `mutation` to the word's record, creating a default row first
    /// if none exists. Runs as one transaction on the writer lane.
    pub fn upsert(
        &self,
        word: &str,
        mutation: impl FnOnce(&mut ProgressRecord),
    ) -> Result<ProgressRecord> {
        self.try_upsert(word, |record| {
            mutation(record);
            Ok(())
        })
    }

    /// `upsert` whose mutation may reject the change; an error rolls the
    /// whole transaction back, including the row creation.
    pub fn try_upsert(
        &self,
        word: &str,
        mutation: impl FnOnce(&mut ProgressRecord) -> Result<()>,
    ) -> Result<ProgressRecord> {
        self.catalog.require(word)?;

        self.db.write(|tx| {
            tx.execute(
                "INSERT OR IGNORE INTO progress (word) VALUES (?1)",
                params![word],
            )?;

            let mut record = fetch(tx, word)?
                .ok_or_else(|| StoreError::UnknownWord(word.to_string()))?;
            mutation(&mut record)?;
            record.word = word.to_string();

            tx.execute(
                "UPDATE progress
                 SET is_learned = ?2, last_reviewed_at = ?3, next_review_due_at = ?4, review_count = ?5
                 WHERE word = ?1",
                params![
                    record.word,
                    record.is_learned,
                    record.last_reviewed_at.map(|t| t.timestamp_millis()),
                    record.next_review_due_at.map(|t| t.timestamp_millis()),
                    record.review_count,
                ],
            )?;
            Ok(record)
        })
    }

    /// Learn an unlearned word. Already-learned words are left untouched.
    pub fn mark_learned(&self, word: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.upsert(word, |record| *record = review::learn(record, now))
    }

    pub fn mark_unlearned(&self, word: &str) -> Result<ProgressRecord> {
        self.upsert(word, |record| *record = review::unlearn(record))
    }

    /// Flip the learned flag, deciding inside the write transaction.
    pub fn toggle_learned(&self, word: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.upsert(word, |record| {
            *record = if record.is_learned {
                review::unlearn(record)
            } else {
                review::learn(record, now)
            };
        })
    }

    /// Count a review of a learned word and schedule the next one.
    pub fn record_review(&self, word: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.try_upsert(word, |record| {
            if !record.is_learned {
                return Err(StoreError::NotLearned(record.word.clone()));
            }
            *record = review::record_review(record, now);
            Ok(())
        })
    }

    /// Insert unlearned placeholders for any of `words` without a row.
    /// Returns how many rows were created.
    pub fn seed_batch(&self, words: &[&str]) -> Result<usize> {
        self.db.write(|tx| {
            let mut stmt = tx.prepare_cached("INSERT OR IGNORE INTO progress (word) VALUES (?1)")?;
            let mut inserted = 0;
            for word in words {
                inserted += stmt.execute(params![word])?;
            }
            Ok(inserted)
        })
    }

    fn query_records(&self, sql: &str, args: &[i64]) -> Result<Vec<ProgressRecord>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), record_from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }
}

fn fetch(conn: &Connection, word: &str) -> Result<Option<ProgressRecord>> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM progress WHERE word = ?1"),
            params![word],
            record_from_row,
        )
        .optional()?)
}

fn record_from_row(row: &Row) -> rusqlite::Result<ProgressRecord> {
    let timestamp = |idx: usize| -> rusqlite::Result<Option<DateTime<Utc>>> {
        Ok(row
            .get::<_, Option<i64>>(idx)?
            .and_then(DateTime::<Utc>::from_timestamp_millis))
    };

    Ok(ProgressRecord {
        word: row.get(0)?,
        is_learned: row.get(1)?,
        last_reviewed_at: timestamp(2)?,
        next_review_due_at: timestamp(3)?,
        review_count: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{write_reference_dataset, Idiom};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 11, 8, 0, 0).unwrap()
    }

    fn create_test_store() -> (ProgressStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let ref_path = temp_dir.path().join("ref.sqlite");
        write_reference_dataset(
            &ref_path,
            &[
                Idiom::new("A", "a", "first"),
                Idiom::new("B", "b", "second"),
                Idiom::new("C", "c", "third"),
            ],
        )
        .unwrap();

        let catalog = Arc::new(ReferenceCatalog::open(&ref_path).unwrap());
        let db = Arc::new(UserDatabase::open(&temp_dir.path().join("UserData.sqlite")).unwrap());
        (ProgressStore::new(db, catalog), temp_dir)
    }

    #[test]
    fn test_get_unknown_word() {
        let (store, _temp) = create_test_store();
        assert!(matches!(store.get("Z"), Err(StoreError::UnknownWord(_))));
        assert!(store.get("A").unwrap().is_none());
    }

    #[test]
    fn test_upsert_creates_then_mutates() {
        let (store, _temp) = create_test_store();

        let record = store.upsert("B", |r| r.review_count = 4).unwrap();
        assert_eq!(record.review_count, 4);
        assert!(!record.is_learned);

        let record = store.upsert("B", |r| r.review_count += 1).unwrap();
        assert_eq!(record.review_count, 5);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_upsert_unknown_word_writes_nothing() {
        let (store, _temp) = create_test_store();
        assert!(matches!(
            store.upsert("Z", |r| r.is_learned = true),
            Err(StoreError::UnknownWord(_))
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_mark_learned_without_placeholder() {
        let (store, _temp) = create_test_store();

        let record = store.mark_learned("A", t0()).unwrap();
        assert!(record.is_learned);
        assert_eq!(record.review_count, 1);
        assert_eq!(store.get("A").unwrap(), Some(record));
    }

    #[test]
    fn test_mark_learned_twice_keeps_first_schedule() {
        let (store, _temp) = create_test_store();

        let first = store.mark_learned("A", t0()).unwrap();
        let second = store.mark_learned("A", t0() + Duration::days(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unlearn_then_relearn_restarts_count() {
        let (store, _temp) = create_test_store();

        store.mark_learned("A", t0()).unwrap();
        store.record_review("A", t0() + Duration::days(1)).unwrap();
        store.mark_unlearned("A").unwrap();
        assert!(store.list_learned().unwrap().is_empty());

        let relearned = store.mark_learned("A", t0() + Duration::days(10)).unwrap();
        assert_eq!(relearned.review_count, 1);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_toggle_learned() {
        let (store, _temp) = create_test_store();

        assert!(store.toggle_learned("C", t0()).unwrap().is_learned);
        let off = store.toggle_learned("C", t0()).unwrap();
        assert!(!off.is_learned);
        assert!(off.next_review_due_at.is_none());
    }

    #[test]
    fn test_record_review_requires_learned() {
        let (store, _temp) = create_test_store();

        assert!(matches!(
            store.record_review("B", t0()),
            Err(StoreError::NotLearned(_))
        ));
        // The rejected review must not leave a placeholder behind
        assert!(store.get("B").unwrap().is_none());
    }

    #[test]
    fn test_list_due_boundaries() {
        let (store, _temp) = create_test_store();
        store.mark_learned("A", t0()).unwrap();

        let due_at = t0() + review::interval(1);
        assert!(store.list_due(due_at - Duration::seconds(1)).unwrap().is_empty());
        assert_eq!(store.list_due(due_at).unwrap().len(), 1);

        let due = store.list_due(due_at + Duration::seconds(1)).unwrap();
        assert_eq!(due[0].word, "A");
    }

    #[test]
    fn test_seed_batch_is_insert_or_ignore() {
        let (store, _temp) = create_test_store();
        store.mark_learned("B", t0()).unwrap();

        assert_eq!(store.seed_batch(&["A", "B", "C"]).unwrap(), 2);
        assert_eq!(store.seed_batch(&["A", "B", "C"]).unwrap(), 0);
        assert!(store.get("B").unwrap().unwrap().is_learned);
    }

    #[test]
    fn test_stats() {
        let (store, _temp) = create_test_store();
        store.seed_batch(&["A", "B", "C"]).unwrap();
        store.mark_learned("A", t0()).unwrap();
        store.mark_learned("B", t0() - Duration::days(30)).unwrap();

        let stats = store.stats(t0(), t0() - Duration::days(7)).unwrap();
        assert_eq!(stats.learned, 2);
        assert_eq!(stats.due, 1);
        assert_eq!(stats.recently_reviewed, 1);
    }
}
