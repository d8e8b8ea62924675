//! Catalog search and search history
//!
//! This module provides:
//! - `SearchIndex`, bounded substring search over the reference catalog
//! - `SearchHistory`, a per-query, retention-limited history log

pub mod history;
pub mod index;
pub mod models;

pub use history::{SearchHistory, HISTORY_GROUP_LIMIT, HISTORY_RETENTION_DAYS};
pub use index::{normalize_query, SearchIndex, SEARCH_LIMIT};
pub use models::{HistoryGroup, SearchHistoryEntry};
