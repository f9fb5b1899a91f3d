//! Storage traits.

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Datelike;
use infra_master::NonWorkday;
use std::collections::HashSet;

/// Owner of the non-workday table.
#[async_trait]
pub trait NonWorkdayStore: Send + Sync {
    /// Create the table if it does not exist. No effect otherwise.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Replace every row of `year` with `rows` in one transaction.
    ///
    /// On failure nothing is changed. Returns the number of rows inserted.
    async fn replace_year(&self, year: i32, rows: &[NonWorkday]) -> Result<u64, StoreError>;

    /// Stored rows of `year`, ascending by date.
    async fn load_year(&self, year: i32) -> Result<Vec<NonWorkday>, StoreError>;
}

/// Reject rows dated outside `year` and repeated dates.
pub fn validate_rows(year: i32, rows: &[NonWorkday]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if row.date.year() != year {
            return Err(StoreError::OutOfRange {
                year,
                date: row.date,
            });
        }
        if !seen.insert(row.date) {
            return Err(StoreError::Duplicate(row.date.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(y: i32, m: u32, d: u32) -> NonWorkday {
        NonWorkday::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), "weekend")
    }

    #[test]
    fn test_accepts_rows_of_year() {
        assert!(validate_rows(2025, &[row(2025, 1, 4), row(2025, 12, 28)]).is_ok());
        assert!(validate_rows(2025, &[]).is_ok());
    }

    #[test]
    fn test_rejects_other_year() {
        let result = validate_rows(2025, &[row(2025, 1, 4), row(2026, 1, 3)]);
        assert!(matches!(result, Err(StoreError::OutOfRange { year: 2025, .. })));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = validate_rows(2025, &[row(2025, 1, 4), row(2025, 1, 4)]);
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }
}
