//! Persistence and scheduling core for an idiom learning app.
//!
//! A read-only reference catalog of idioms is paired with a writable user
//! dataset holding per-word learning progress and search history. A single
//! [`Handle`] opens both, keeps progress seeded for every catalog word, and
//! exposes the operations the learning, review, search and game screens use.

pub mod catalog;
mod commands;
pub mod config;
pub mod daily;
pub mod error;
pub mod progress;
pub mod review;
pub mod search;
pub mod store;

pub use catalog::{Idiom, ReferenceCatalog};
pub use config::CoreConfig;
pub use error::{Result, StoreError};
pub use progress::{IdiomWithProgress, ProgressRecord, ReviewStats};
pub use search::{HistoryGroup, SearchHistoryEntry};
pub use store::{Handle, StoreEvent, StoreObserver};
