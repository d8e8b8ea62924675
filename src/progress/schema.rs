//! Progress dataset schema and in-place migration.
//!
//! Versions are tracked with `PRAGMA user_version`:
//! - 1: `progress` table
//! - 2: `search_history` table

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{is_corruption, Result, StoreError};

pub(crate) const SCHEMA_VERSION: i32 = 2;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const V1: &str = r#"
    CREATE TABLE IF NOT EXISTS progress (
        word TEXT PRIMARY KEY NOT NULL,
        is_learned INTEGER NOT NULL DEFAULT 0,
        last_reviewed_at INTEGER,
        next_review_due_at INTEGER,
        review_count INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_progress_due
        ON progress(is_learned, next_review_due_at);
"#;

const V2: &str = r#"
    CREATE TABLE IF NOT EXISTS search_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        query TEXT NOT NULL,
        matched_word TEXT NOT NULL,
        searched_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_search_history_query ON search_history(query);
    CREATE INDEX IF NOT EXISTS idx_search_history_date ON search_history(searched_at);
"#;

/// Bring the writable connection up to the current schema.
///
/// Unreadable files, failed integrity checks and schemas from a newer
/// version all come back as `StoreCorruption`.
pub(crate) fn prepare_writer(conn: &Connection, path: &Path) -> Result<()> {
    let corrupted = |reason: String| StoreError::StoreCorruption {
        path: path.to_path_buf(),
        reason,
    };
    let classify = |err: rusqlite::Error| {
        if is_corruption(&err) {
            corrupted(err.to_string())
        } else {
            StoreError::Sqlite(err)
        }
    };

    conn.busy_timeout(BUSY_TIMEOUT)?;
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(classify)?;

    let check: String = conn
        .query_row("PRAGMA quick_check", [], |row| row.get(0))
        .map_err(classify)?;
    if check != "ok" {
        return Err(corrupted(format!("integrity check failed: {}", check)));
    }

    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(classify)?;
    if version > SCHEMA_VERSION {
        return Err(corrupted(format!(
            "schema version {} is newer than supported {}",
            version, SCHEMA_VERSION
        )));
    }

    if version < SCHEMA_VERSION {
        log::info!("Migrating progress schema {} -> {}", version, SCHEMA_VERSION);
        let mut batch = String::new();
        if version < 1 {
            batch.push_str(V1);
        }
        if version < 2 {
            batch.push_str(V2);
        }
        batch.push_str(&format!("PRAGMA user_version = {};", SCHEMA_VERSION));
        // A table left behind by some other schema fails here, not as NOTADB.
        conn.execute_batch(&format!("BEGIN IMMEDIATE;{}COMMIT;", batch))
            .map_err(|e| {
                if is_corruption(&e) {
                    corrupted(e.to_string())
                } else {
                    corrupted(format!("incompatible schema during migration: {}", e))
                }
            })?;
    }

    // Right table names with the wrong columns count as incompatible.
    for shape in [
        "SELECT word, is_learned, last_reviewed_at, next_review_due_at, review_count FROM progress LIMIT 0",
        "SELECT id, query, matched_word, searched_at FROM search_history LIMIT 0",
    ] {
        conn.prepare(shape)
            .map_err(|e| corrupted(format!("incompatible schema: {}", e)))?;
    }

    Ok(())
}

/// Settings for the read-side connection.
pub(crate) fn prepare_reader(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA query_only = ON;")?;
    Ok(())
}
