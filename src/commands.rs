//! Read/write operations consumed by the learning, review, search and game
//! screens. These are the only entry points the UI layer uses.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::index::sample;

use crate::catalog::Idiom;
use crate::daily::select_daily_word;
use crate::error::{Result, StoreError};
use crate::progress::{IdiomWithProgress, ProgressRecord, ReviewStats};
use crate::search::{normalize_query, HistoryGroup, HISTORY_RETENTION_DAYS};
use crate::store::{Handle, StoreEvent};

impl Handle {
    // ==================== Learning ====================

    /// The idiom of the day for `date`.
    pub fn daily_idiom(&self, date: NaiveDate) -> Result<IdiomWithProgress> {
        let index = select_daily_word(self.catalog_size()?, date)?;
        let idiom = self
            .catalog()
            .get(index % self.catalog().len().max(1))
            .ok_or(StoreError::EmptyCatalog)?;
        self.with_progress(idiom)
    }

    pub fn get_idiom(&self, word: &str) -> Result<IdiomWithProgress> {
        let idiom = self.catalog().require(word)?;
        self.with_progress(idiom)
    }

    /// Learn an unlearned word, or unlearn a learned one.
    pub fn toggle_learned(&self, word: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        let record = self.progress().toggle_learned(word, now)?;
        let event = if record.is_learned {
            StoreEvent::Learned { word: record.word.clone() }
        } else {
            StoreEvent::Unlearned { word: record.word.clone() }
        };
        self.notify(&event);
        Ok(record)
    }

    pub fn list_learned_idioms(&self) -> Result<Vec<IdiomWithProgress>> {
        let records = self.progress().list_learned()?;
        Ok(self.join_catalog(records))
    }

    // ==================== Review ====================

    pub fn list_due_for_review(&self, now: DateTime<Utc>) -> Result<Vec<IdiomWithProgress>> {
        let records = self.progress().list_due(now)?;
        Ok(self.join_catalog(records))
    }

    /// Learned words reviewed within the last `days` days, newest first.
    pub fn list_recently_reviewed(
        &self,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<IdiomWithProgress>> {
        let records = self.progress().list_reviewed_since(now - Duration::days(days))?;
        Ok(self.join_catalog(records))
    }

    /// Count a review of a learned word and schedule the next one.
    pub fn mark_reviewed(&self, word: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        let record = self.progress().record_review(word, now)?;
        self.notify(&StoreEvent::Reviewed {
            word: record.word.clone(),
            review_count: record.review_count,
        });
        Ok(record)
    }

    pub fn review_stats(&self, now: DateTime<Utc>) -> Result<ReviewStats> {
        let mut stats = self.progress().stats(now, Self::recent_cutoff(now))?;
        stats.total_idioms = self.catalog().len();
        Ok(stats)
    }

    // ==================== Search ====================

    /// Search the catalog and replace the stored history for the query.
    /// A query that now matches nothing drops its old group.
    pub fn search(&self, query: &str, now: DateTime<Utc>) -> Result<Vec<Idiom>> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let results = self.search_index().search(query);
        self.history().record_search(query, &results, now)?;
        self.notify(&StoreEvent::HistoryChanged);
        Ok(results)
    }

    pub fn recent_searches(&self, now: DateTime<Utc>) -> Result<Vec<HistoryGroup>> {
        self.history().list_history(now)
    }

    pub fn delete_recent_search(&self, query: &str) -> Result<usize> {
        let removed = self.history().delete_query(query)?;
        if removed > 0 {
            self.notify(&StoreEvent::HistoryChanged);
        }
        Ok(removed)
    }

    /// Drop history entries past the retention window.
    pub fn clear_old_searches(&self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self.history().purge_older_than(HISTORY_RETENTION_DAYS, now)?;
        if removed > 0 {
            self.notify(&StoreEvent::HistoryChanged);
        }
        Ok(removed)
    }

    // ==================== Game ====================

    /// Up to `count` distinct idioms chosen uniformly at random.
    pub fn random_idioms(&self, count: usize) -> Vec<Idiom> {
        let catalog = self.catalog();
        let amount = count.min(catalog.len());
        sample(&mut rand::thread_rng(), catalog.len(), amount)
            .into_iter()
            .filter_map(|index| catalog.get(index).cloned())
            .collect()
    }

    // ==================== Helpers ====================

    fn with_progress(&self, idiom: &Idiom) -> Result<IdiomWithProgress> {
        let progress = self
            .progress()
            .get(&idiom.word)?
            .unwrap_or_else(|| ProgressRecord::new(idiom.word.clone()));
        Ok(IdiomWithProgress {
            idiom: idiom.clone(),
            progress,
        })
    }

    /// Attach catalog entries to progress rows, skipping words the corpus
    /// no longer contains.
    fn join_catalog(&self, records: Vec<ProgressRecord>) -> Vec<IdiomWithProgress> {
        records
            .into_iter()
            .filter_map(|progress| {
                let idiom = self.catalog().get_by_word(&progress.word)?.clone();
                Some(IdiomWithProgress { idiom, progress })
            })
            .collect()
    }
}
