use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The reference dataset is missing or does not match the idiom schema.
    /// There is no recovery path for this one.
    #[error("Cannot open reference dataset {path:?}: {reason}")]
    StoreOpen { path: PathBuf, reason: String },

    #[error("Progress dataset {path:?} is corrupted: {reason}")]
    StoreCorruption { path: PathBuf, reason: String },

    #[error("Reference dataset is read-only: {0}")]
    ReadOnlyViolation(String),

    #[error("Unknown word: {0}")]
    UnknownWord(String),

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Word is not learned: {0}")]
    NotLearned(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

/// SQLite result codes that mean the file itself is unusable.
pub(crate) fn is_corruption(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::NotADatabase) | Some(rusqlite::ErrorCode::DatabaseCorrupt)
    )
}

pub(crate) fn is_read_only(err: &rusqlite::Error) -> bool {
    matches!(err.sqlite_error_code(), Some(rusqlite::ErrorCode::ReadOnly))
}
