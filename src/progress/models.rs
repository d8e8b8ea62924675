//! Data models for per-word learning progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Idiom;

/// Learning ledger entry for one word. Never deleted; unlearning resets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub word: String,
    #[serde(default)]
    pub is_learned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_due_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_count: u32,
}

impl ProgressRecord {
    /// Unlearned placeholder, as written by seeding.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            is_learned: false,
            last_reviewed_at: None,
            next_review_due_at: None,
            review_count: 0,
        }
    }
}

/// Counts shown on the review screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_idioms: usize,
    pub learned: usize,
    pub due: usize,
    pub recently_reviewed: usize,
}

/// An idiom with its progress, used by learning and review screens.
/// Words without a progress row get an unlearned placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdiomWithProgress {
    pub idiom: Idiom,
    pub progress: ProgressRecord,
}
