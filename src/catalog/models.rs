//! Data models for the reference corpus

use serde::{Deserialize, Serialize};

/// An immutable reference entry. `word` is the unique key.
///
/// The aliases accept the field names used by the upstream idiom JSON dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idiom {
    pub word: String,
    #[serde(alias = "pinyin")]
    pub pronunciation: String,
    #[serde(alias = "explanation")]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, alias = "derivation", skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

impl Idiom {
    pub fn new(word: impl Into<String>, pronunciation: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pronunciation: pronunciation.into(),
            definition: definition.into(),
            example: None,
            origin: None,
            abbreviation: None,
        }
    }

    /// Case-insensitive substring match over the searchable fields.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(needle);

        hit(&self.word)
            || hit(&self.pronunciation)
            || hit(&self.definition)
            || self.origin.as_deref().map_or(false, hit)
            || self.example.as_deref().map_or(false, hit)
    }
}
