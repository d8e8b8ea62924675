//! Build-time conversion of the idiom JSON dump into a reference dataset.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection};

use super::models::Idiom;
use crate::error::Result;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS idioms (
        word TEXT PRIMARY KEY,
        pronunciation TEXT NOT NULL,
        definition TEXT NOT NULL,
        example TEXT,
        origin TEXT,
        abbreviation TEXT
    );
"#;

/// Convert a JSON array of idioms into a fresh reference SQLite file.
/// Returns the number of idioms written.
pub fn build_reference_dataset(json_path: &Path, sqlite_path: &Path) -> Result<usize> {
    let content = fs::read_to_string(json_path)?;
    let idioms: Vec<Idiom> = serde_json::from_str(&content)?;
    log::info!("Parsed {} idioms from {:?}", idioms.len(), json_path);

    write_reference_dataset(sqlite_path, &idioms)
}

/// Write `idioms` into a new reference file, replacing any existing one.
/// Duplicate words keep their first occurrence.
pub fn write_reference_dataset(sqlite_path: &Path, idioms: &[Idiom]) -> Result<usize> {
    if let Some(parent) = sqlite_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if sqlite_path.exists() {
        fs::remove_file(sqlite_path)?;
    }

    let mut conn = Connection::open(sqlite_path)?;
    conn.execute_batch(SCHEMA)?;

    let tx = conn.transaction()?;
    let mut written = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO idioms (word, pronunciation, definition, example, origin, abbreviation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for (index, idiom) in idioms.iter().enumerate() {
            written += stmt.execute(params![
                idiom.word,
                idiom.pronunciation,
                idiom.definition,
                idiom.example,
                idiom.origin,
                idiom.abbreviation,
            ])?;

            if index > 0 && index % 1000 == 0 {
                log::debug!("Inserted {} idioms...", index);
            }
        }
    }
    tx.commit()?;

    log::info!("Wrote {} idioms to {:?}", written, sqlite_path);
    Ok(written)
}
