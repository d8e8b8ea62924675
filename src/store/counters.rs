//! Small durable key/value counters kept outside the databases.
//!
//! Stored as a JSON object and rewritten atomically on every `set`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Key holding the reference catalog size
pub const CATALOG_SIZE_KEY: &str = "catalogSize";

pub struct CounterStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, u64>>,
}

impl CounterStore {
    /// Load counters from `path`. A missing or unreadable file starts empty.
    pub fn open(path: &Path) -> Result<Self> {
        let values = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable counters file {:?}: {}", path, e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: Mutex::new(values),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<u64>> {
        Ok(self.values.lock()?.get(key).copied())
    }

    pub fn set(&self, key: &str, value: u64) -> Result<()> {
        let mut values = self.values.lock()?;
        if values.get(key) == Some(&value) && self.path.exists() {
            return Ok(());
        }
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn persist(&self, values: &BTreeMap<String, u64>) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        temp_file.persist(&self.path)?;
        Ok(())
    }
}
