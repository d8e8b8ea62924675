//! Change notifications for UI collaborators.
//!
//! Observers are called synchronously after the write has committed.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    Learned { word: String },
    Unlearned { word: String },
    Reviewed { word: String, review_count: u32 },
    /// Seeding finished; `inserted` placeholder rows were created
    Seeded { inserted: usize },
    HistoryChanged,
}

pub trait StoreObserver: Send + Sync {
    fn on_event(&self, event: &StoreEvent);
}

impl<F> StoreObserver for F
where
    F: Fn(&StoreEvent) + Send + Sync,
{
    fn on_event(&self, event: &StoreEvent) {
        self(event)
    }
}
