//! Fixed-schedule spaced repetition
//!
//! Intervals come from a static table indexed by review count; there is no
//! per-word difficulty or ease factor.

pub mod algorithm;

pub use algorithm::{
    format_interval, interval, is_due, learn, record_review, unlearn, INTERVAL_DAYS,
    RECENT_REVIEW_DAYS,
};
