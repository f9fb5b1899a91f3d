//! Year enumeration and weekend rules.

use crate::error::MasterDataError;
use chrono::{Datelike, NaiveDate, Weekday};

/// Check if a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First and last day (Jan 1, Dec 31) of `year`.
pub fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), MasterDataError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    match (first, last) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(MasterDataError::YearOutOfRange(year)),
    }
}

/// Every date of `year`, Jan 1 through Dec 31 inclusive, ascending.
///
/// Years chrono cannot represent yield an empty list.
pub fn all_dates_of(year: i32) -> Vec<NaiveDate> {
    let Ok((first, last)) = year_bounds(year) else {
        return Vec::new();
    };

    first.iter_days().take_while(|d| *d <= last).collect()
}
