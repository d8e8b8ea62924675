//! Store manager
//!
//! Opens the read-only reference catalog and the writable user dataset as
//! one `Handle`, keeps the progress ledger complete relative to the catalog,
//! and recovers from a corrupted user dataset by recreating it.

use std::path::Path;
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};

use super::counters::{CounterStore, CATALOG_SIZE_KEY};
use super::events::{StoreEvent, StoreObserver};
use crate::catalog::ReferenceCatalog;
use crate::config::CoreConfig;
use crate::error::{Result, StoreError};
use crate::progress::{remove_database_files, ProgressStore, UserDatabase};
use crate::review::RECENT_REVIEW_DAYS;
use crate::search::{SearchHistory, SearchIndex, HISTORY_RETENTION_DAYS};

pub struct Handle {
    catalog: Arc<ReferenceCatalog>,
    progress: ProgressStore,
    search_index: SearchIndex,
    history: SearchHistory,
    counters: CounterStore,
    observers: RwLock<Vec<Arc<dyn StoreObserver>>>,
    seed_batch_size: usize,
}

impl Handle {
    /// Open with default settings. Counters live next to the progress file.
    pub fn open(reference_path: &Path, progress_path: &Path) -> Result<Self> {
        let data_dir = progress_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut config = CoreConfig::new(data_dir);
        config.reference_path = Some(reference_path.to_path_buf());
        if let Some(name) = progress_path.file_name() {
            config.progress_file = name.to_string_lossy().into_owned();
        }
        Self::open_with_config(&config)
    }

    /// Open both datasets, recover the user dataset if needed, then seed.
    ///
    /// Only a failure to open the reference dataset is fatal. Seeding and
    /// history cleanup failures are logged and retried on the next open.
    pub fn open_with_config(config: &CoreConfig) -> Result<Self> {
        let catalog = Arc::new(ReferenceCatalog::open(&config.reference_path())?);
        let db = Arc::new(open_user_database(&config.progress_path())?);

        let counters = CounterStore::open(&config.counters_path())?;
        counters.set(CATALOG_SIZE_KEY, catalog.len() as u64)?;

        let handle = Self {
            progress: ProgressStore::new(Arc::clone(&db), Arc::clone(&catalog)),
            search_index: SearchIndex::new(Arc::clone(&catalog)),
            history: SearchHistory::new(db, Arc::clone(&catalog)),
            catalog,
            counters,
            observers: RwLock::new(Vec::new()),
            seed_batch_size: config.seed_batch_size.max(1),
        };

        if let Err(e) = handle.reconcile_progress() {
            log::warn!("Seeding progress failed, will retry on next launch: {}", e);
        }
        if let Err(e) = handle.history.purge_older_than(HISTORY_RETENTION_DAYS, Utc::now()) {
            log::warn!("Search history cleanup failed: {}", e);
        }

        Ok(handle)
    }

    /// Create an unlearned row for every idiom that lacks one.
    ///
    /// Idempotent. Rows are inserted in batches with `INSERT OR IGNORE`,
    /// releasing the writer lane between batches so interactive writes are
    /// not starved. Returns the number of rows created.
    pub fn reconcile_progress(&self) -> Result<usize> {
        let words: Vec<&str> = self.catalog.words().collect();
        let mut inserted = 0;

        for (batch_index, batch) in words.chunks(self.seed_batch_size).enumerate() {
            inserted += self.progress.seed_batch(batch)?;
            log::debug!(
                "Seeded batch {} ({} words, {} new so far)",
                batch_index,
                batch.len(),
                inserted
            );
            std::thread::yield_now();
        }

        log::info!(
            "Progress reconciled: {} idioms, {} placeholders created",
            words.len(),
            inserted
        );
        self.notify(&StoreEvent::Seeded { inserted });
        Ok(inserted)
    }

    /// Run `reconcile_progress` on a dedicated worker thread.
    pub fn reconcile_in_background(self: &Arc<Self>) -> Result<JoinHandle<Result<usize>>> {
        let handle = Arc::clone(self);
        let worker = std::thread::Builder::new()
            .name("progress-seed".to_string())
            .spawn(move || {
                let result = handle.reconcile_progress();
                if let Err(e) = &result {
                    log::warn!("Background seeding failed: {}", e);
                }
                result
            })?;
        Ok(worker)
    }

    /// Catalog size from the counter side-channel, falling back to the
    /// loaded catalog if the counter was never written.
    pub fn catalog_size(&self) -> Result<usize> {
        Ok(self
            .counters
            .get(CATALOG_SIZE_KEY)?
            .map(|n| n as usize)
            .unwrap_or_else(|| self.catalog.len()))
    }

    pub fn subscribe(&self, observer: Arc<dyn StoreObserver>) -> Result<()> {
        self.observers.write()?.push(observer);
        Ok(())
    }

    /// Deliver `event` to a snapshot of the current observers. The lock is
    /// released first so an observer may subscribe from its callback.
    pub(crate) fn notify(&self, event: &StoreEvent) {
        let observers = match self.observers.read() {
            Ok(observers) => observers.clone(),
            Err(_) => {
                log::warn!("Observer list poisoned, dropping {:?}", event);
                return;
            }
        };
        for observer in &observers {
            observer.on_event(event);
        }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search_index
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn counters(&self) -> &CounterStore {
        &self.counters
    }

    pub(crate) fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
        now - chrono::Duration::days(RECENT_REVIEW_DAYS)
    }
}

/// Open the user dataset, deleting and recreating it if it is corrupted.
fn open_user_database(path: &Path) -> Result<UserDatabase> {
    match UserDatabase::open(path) {
        Err(StoreError::StoreCorruption { path, reason }) => {
            log::warn!(
                "Progress dataset {:?} is unusable ({}), recreating it",
                path,
                reason
            );
            remove_database_files(&path)?;
            UserDatabase::open(&path)
        }
        other => other,
    }
}
