//! Search history log
//!
//! Stored beside progress in the user dataset but never joined with it.
//! Each search replaces the previous entries for the same query text.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rusqlite::params;

use super::models::{HistoryGroup, SearchHistoryEntry};
use crate::catalog::{Idiom, ReferenceCatalog};
use crate::error::Result;
use crate::progress::UserDatabase;

/// Queries shown in the recent-searches list
pub const HISTORY_GROUP_LIMIT: usize = 10;
/// Entries older than this are hidden and eligible for purging
pub const HISTORY_RETENTION_DAYS: i64 = 7;

pub struct SearchHistory {
    db: Arc<UserDatabase>,
    catalog: Arc<ReferenceCatalog>,
}

impl SearchHistory {
    pub fn new(db: Arc<UserDatabase>, catalog: Arc<ReferenceCatalog>) -> Self {
        Self { db, catalog }
    }

    /// Replace the history for `query` with one entry per result.
    /// Blank queries are not recorded.
    pub fn record_search(&self, query: &str, results: &[Idiom], now: DateTime<Utc>) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }

        let searched_at = now.timestamp_millis();
        self.db.write(|tx| {
            tx.execute("DELETE FROM search_history WHERE query = ?1", params![query])?;

            let mut stmt = tx.prepare_cached(
                "INSERT INTO search_history (query, matched_word, searched_at) VALUES (?1, ?2, ?3)",
            )?;
            for idiom in results {
                stmt.execute(params![query, idiom.word, searched_at])?;
            }
            Ok(())
        })
    }

    /// Raw entries for one query, in insertion order.
    pub fn entries(&self, query: &str) -> Result<Vec<SearchHistoryEntry>> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT query, matched_word, searched_at FROM search_history
                 WHERE query = ?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![query], |row| {
                Ok(SearchHistoryEntry {
                    query: row.get(0)?,
                    matched_word: row.get(1)?,
                    searched_at: DateTime::<Utc>::from_timestamp_millis(row.get(2)?)
                        .unwrap_or_default(),
                })
            })?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// Recent searches grouped by query, newest first, within the
    /// retention window and capped at `HISTORY_GROUP_LIMIT` groups.
    pub fn list_history(&self, now: DateTime<Utc>) -> Result<Vec<HistoryGroup>> {
        let cutoff = retention_cutoff(HISTORY_RETENTION_DAYS, now);

        let rows: Vec<(String, String, i64)> = self.db.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT query, matched_word, searched_at FROM search_history
                 WHERE searched_at >= ?1
                 ORDER BY searched_at DESC, id ASC",
            )?;
            let rows = stmt.query_map(params![cutoff.timestamp_millis()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })?;

        let mut groups: Vec<HistoryGroup> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (query, word, searched_at) in rows {
            let Some(idiom) = self.catalog.get_by_word(&word) else {
                log::debug!("History entry for unknown word {:?} skipped", word);
                continue;
            };

            // Rows arrive newest first, so the first row seen fixes the group's time
            let index = *positions.entry(query.clone()).or_insert_with(|| {
                groups.push(HistoryGroup {
                    query,
                    searched_at: DateTime::<Utc>::from_timestamp_millis(searched_at)
                        .unwrap_or_default(),
                    results: Vec::new(),
                });
                groups.len() - 1
            });
            groups[index].results.push(idiom.clone());
        }

        groups.truncate(HISTORY_GROUP_LIMIT);
        Ok(groups)
    }

    /// Remove every entry for one query.
    pub fn delete_query(&self, query: &str) -> Result<usize> {
        self.db.write(|tx| {
            Ok(tx.execute("DELETE FROM search_history WHERE query = ?1", params![query])?)
        })
    }

    /// Delete entries searched before `now - days`.
    pub fn purge_older_than(&self, days: i64, now: DateTime<Utc>) -> Result<usize> {
        let cutoff = retention_cutoff(days, now);
        let removed = self.db.write(|tx| {
            Ok(tx.execute(
                "DELETE FROM search_history WHERE searched_at < ?1",
                params![cutoff.timestamp_millis()],
            )?)
        })?;

        if removed > 0 {
            log::info!("Purged {} search history entries older than {} days", removed, days);
        }
        Ok(removed)
    }
}

fn retention_cutoff(days: i64, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(days)
}
