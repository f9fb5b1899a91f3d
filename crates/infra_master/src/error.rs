//! Master data errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when building calendar master data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MasterDataError {
    /// Entry range ends before it starts
    #[error("Invalid range for '{name}': {end} is before {start}")]
    InvalidRange {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Year outside the supported calendar
    #[error("Year out of range: {0}")]
    YearOutOfRange(i32),
}
