//! Substring search over the reference catalog.

use std::sync::Arc;

use crate::catalog::{Idiom, ReferenceCatalog};

/// Upper bound on results per query
pub const SEARCH_LIMIT: usize = 50;

pub struct SearchIndex {
    catalog: Arc<ReferenceCatalog>,
}

impl SearchIndex {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    /// Case-insensitive match on word, pronunciation, definition, origin or
    /// example, in catalog order, at most `SEARCH_LIMIT` hits.
    /// Blank queries return nothing.
    pub fn search(&self, query: &str) -> Vec<Idiom> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Vec::new();
        }

        self.catalog.find_matching(&query.to_lowercase(), SEARCH_LIMIT)
    }
}

/// Query text as stored in history.
pub fn normalize_query(query: &str) -> &str {
    query.trim()
}
