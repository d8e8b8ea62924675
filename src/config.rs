//! Core configuration
//!
//! Read from `config.toml` in the data directory. Every field is optional;
//! a missing file means defaults everywhere.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "idiom-quest";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Read-only idiom corpus. Defaults to `IdiomData.sqlite` inside `data_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_path: Option<PathBuf>,
    #[serde(default = "default_progress_file")]
    pub progress_file: String,
    #[serde(default = "default_counters_file")]
    pub counters_file: String,
    /// Rows per seeding transaction
    #[serde(default = "default_seed_batch_size")]
    pub seed_batch_size: usize,
}

fn default_progress_file() -> String {
    "UserData.sqlite".to_string()
}

fn default_counters_file() -> String {
    "counters.json".to_string()
}

fn default_seed_batch_size() -> usize {
    500
}

/// Partial view of `config.toml`; `data_dir` may be omitted there.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    reference_path: Option<PathBuf>,
    progress_file: Option<String>,
    counters_file: Option<String>,
    seed_batch_size: Option<usize>,
}

impl CoreConfig {
    /// Defaults rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            reference_path: None,
            progress_file: default_progress_file(),
            counters_file: default_counters_file(),
            seed_batch_size: default_seed_batch_size(),
        }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or(StoreError::DataDirNotFound)
    }

    /// Load `config.toml` from `data_dir`, falling back to defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut config = Self::new(data_dir.to_path_buf());
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let file: ConfigFile = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);

        if let Some(dir) = file.data_dir {
            config.data_dir = dir;
        }
        config.reference_path = file.reference_path;
        if let Some(name) = file.progress_file {
            config.progress_file = name;
        }
        if let Some(name) = file.counters_file {
            config.counters_file = name;
        }
        if let Some(size) = file.seed_batch_size {
            config.seed_batch_size = size.max(1);
        }
        Ok(config)
    }

    pub fn reference_path(&self) -> PathBuf {
        self.reference_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("IdiomData.sqlite"))
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(&self.progress_file)
    }

    pub fn counters_path(&self) -> PathBuf {
        self.data_dir.join(&self.counters_file)
    }
}
