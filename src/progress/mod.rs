//! Per-word learning progress
//!
//! This module provides:
//! - `ProgressRecord`, the mutable learning ledger entry
//! - `UserDatabase`, the writable dataset with its single writer lane
//! - `ProgressStore`, create/read/update over progress rows
//! - Schema creation and in-place migration

pub mod database;
pub mod models;
mod schema;
pub mod storage;

pub use database::{remove_database_files, UserDatabase};
pub use models::*;
pub use storage::ProgressStore;
