//! Store errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Query error
    #[error("Query error: {0}")]
    QueryError(String),

    /// Row dated outside the year being replaced
    #[error("Row dated {date} does not belong to year {year}")]
    OutOfRange { year: i32, date: NaiveDate },

    /// Duplicate record
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Database error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether reconnecting might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::ConnectionError(_) => true,
            #[cfg(feature = "mysql")]
            StoreError::DatabaseError(e) => {
                matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
            }
            _ => false,
        }
    }
}
