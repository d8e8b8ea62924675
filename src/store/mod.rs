//! Store manager: one handle over the reference catalog and user dataset
//!
//! This module provides:
//! - `Handle`, opened once per process and passed to every operation
//! - Startup seeding and corruption recovery
//! - The counter side-channel
//! - Observer notifications for collaborators

pub mod counters;
pub mod events;
mod manager;

pub use counters::{CounterStore, CATALOG_SIZE_KEY};
pub use events::{StoreEvent, StoreObserver};
pub use manager::Handle;
