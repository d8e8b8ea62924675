//! Data models for search and search history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Idiom;

/// One matched word recorded for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub query: String,
    pub matched_word: String,
    pub searched_at: DateTime<Utc>,
}

/// All entries of one query, as shown in the "recent searches" list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryGroup {
    pub query: String,
    /// Most recent time this query was run
    pub searched_at: DateTime<Utc>,
    pub results: Vec<Idiom>,
}
