//! Item-of-the-day selection.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, StoreError};

/// Index of the daily idiom: day of month modulo catalog size.
///
/// Stable for a given calendar day, so restarts show the same idiom.
pub fn select_daily_word(catalog_size: usize, date: NaiveDate) -> Result<usize> {
    if catalog_size == 0 {
        return Err(StoreError::EmptyCatalog);
    }
    Ok(date.day() as usize % catalog_size)
}
