//! Read-only access to the idiom corpus.
//!
//! The reference file is opened with `SQLITE_OPEN_READ_ONLY` and loaded once
//! into an in-memory snapshot. Reads never take a lock; the connection is
//! kept only so that write attempts are rejected by SQLite itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OpenFlags};

use super::models::Idiom;
use crate::error::{is_read_only, Result, StoreError};

pub struct ReferenceCatalog {
    idioms: Vec<Idiom>,
    by_word: HashMap<String, usize>,
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl ReferenceCatalog {
    /// Open the reference dataset. Any failure here is fatal for the caller.
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |reason: String| StoreError::StoreOpen {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_file() {
            return Err(open_error("file does not exist".to_string()));
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| open_error(e.to_string()))?;

        let idioms = load_idioms(&conn).map_err(|e| open_error(e.to_string()))?;

        let mut by_word = HashMap::with_capacity(idioms.len());
        let mut unique = Vec::with_capacity(idioms.len());
        for idiom in idioms {
            if by_word.contains_key(&idiom.word) {
                log::warn!("Duplicate idiom {:?} in reference dataset, keeping first", idiom.word);
                continue;
            }
            by_word.insert(idiom.word.clone(), unique.len());
            unique.push(idiom);
        }

        log::info!("Opened reference dataset {:?} ({} idioms)", path, unique.len());

        Ok(Self {
            idioms: unique,
            by_word,
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    pub fn len(&self) -> usize {
        self.idioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idioms.is_empty()
    }

    /// Lookup by position in natural storage order.
    pub fn get(&self, index: usize) -> Option<&Idiom> {
        self.idioms.get(index)
    }

    pub fn get_by_word(&self, word: &str) -> Option<&Idiom> {
        self.by_word.get(word).map(|&i| &self.idioms[i])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.by_word.contains_key(word)
    }

    /// Fail with `UnknownWord` unless `word` is in the corpus.
    pub fn require(&self, word: &str) -> Result<&Idiom> {
        self.get_by_word(word)
            .ok_or_else(|| StoreError::UnknownWord(word.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Idiom> {
        self.idioms.iter()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.idioms.iter().map(|i| i.word.as_str())
    }

    /// Substring match across word, pronunciation, definition, origin and
    /// example, in storage order, stopping after `limit` hits.
    /// `needle` must already be lowercased.
    pub fn find_matching(&self, needle: &str, limit: usize) -> Vec<Idiom> {
        self.idioms
            .iter()
            .filter(|idiom| idiom.matches(needle))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Attempt to write into the reference dataset.
    ///
    /// The file is opened read-only, so SQLite rejects this and the error is
    /// surfaced as `ReadOnlyViolation`.
    pub fn try_insert(&self, idiom: &Idiom) -> Result<()> {
        let conn = self.conn.lock()?;
        let outcome = conn.execute(
            "INSERT INTO idioms (word, pronunciation, definition, example, origin, abbreviation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                idiom.word,
                idiom.pronunciation,
                idiom.definition,
                idiom.example,
                idiom.origin,
                idiom.abbreviation,
            ],
        );

        match outcome {
            Err(e) if is_read_only(&e) => {
                log::error!("Rejected write to reference dataset: {}", idiom.word);
                Err(StoreError::ReadOnlyViolation(idiom.word.clone()))
            }
            Err(e) => Err(e.into()),
            Ok(_) => Err(StoreError::ReadOnlyViolation(format!(
                "{} (write unexpectedly accepted by {:?})",
                idiom.word, self.path
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_idioms(conn: &Connection) -> rusqlite::Result<Vec<Idiom>> {
    let mut stmt = conn.prepare(
        "SELECT word, pronunciation, definition, example, origin, abbreviation
         FROM idioms ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Idiom {
            word: row.get(0)?,
            pronunciation: row.get(1)?,
            definition: row.get(2)?,
            example: row.get(3)?,
            origin: row.get(4)?,
            abbreviation: row.get(5)?,
        })
    })?;

    rows.collect()
}
