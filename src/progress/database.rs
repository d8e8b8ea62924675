//! Connection pair for the writable user dataset.
//!
//! All mutations go through one writer connection held behind a mutex, each
//! inside an immediate transaction. Reads use a second connection; with WAL
//! they only ever see committed state and do not wait for the writer.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::schema::{prepare_reader, prepare_writer};
use crate::error::Result;

pub struct UserDatabase {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
    path: PathBuf,
}

impl UserDatabase {
    /// Open (creating if needed) and migrate the dataset at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let writer = Connection::open(path)?;
        prepare_writer(&writer, path)?;

        let reader = Connection::open(path)?;
        prepare_reader(&reader)?;

        log::info!("Opened progress dataset {:?}", path);

        Ok(Self {
            writer: Mutex::new(writer),
            reader: Mutex::new(reader),
            path: path.to_path_buf(),
        })
    }

    /// Run `f` inside a write transaction on the single writer lane.
    /// Nothing is visible to readers unless `f` succeeds.
    pub fn write<T>(&self, f: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        let mut conn = self.writer.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = f(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.reader.lock()?;
        f(&conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Remove a dataset file together with its WAL and shared-memory siblings.
pub fn remove_database_files(path: &Path) -> Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        targets.push(PathBuf::from(name));
    }

    for target in targets {
        if target.exists() {
            fs::remove_file(&target)?;
            log::debug!("Removed {:?}", target);
        }
    }
    Ok(())
}
