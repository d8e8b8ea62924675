use std::path::PathBuf;

use anyhow::{Context, Result};

use idiom_quest_lib::{CoreConfig, Handle};

/// Shared application state for CLI commands
pub struct App {
    pub config: CoreConfig,
    pub handle: Handle,
}

impl App {
    /// Load `config.toml` from the data directory and open the store.
    pub fn new(data_dir: Option<PathBuf>, reference: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => CoreConfig::default_data_dir().context("Failed to get data directory")?,
        };

        let mut config = CoreConfig::load(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
        if let Some(path) = reference {
            config.reference_path = Some(path);
        }

        let handle = Handle::open_with_config(&config).with_context(|| {
            format!(
                "Failed to open idiom data (reference: {})",
                config.reference_path().display()
            )
        })?;

        Ok(Self { config, handle })
    }
}
