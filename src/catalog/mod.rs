//! Immutable idiom corpus
//!
//! This module provides:
//! - The `Idiom` reference model
//! - `ReferenceCatalog`, a lock-free read-only view of the corpus
//! - The build-time JSON to SQLite dataset builder

pub mod import;
pub mod models;
mod reference;

pub use import::{build_reference_dataset, write_reference_dataset};
pub use models::Idiom;
pub use reference::ReferenceCatalog;
