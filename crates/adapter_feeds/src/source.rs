//! Holiday source trait.

use crate::error::FeedError;
use async_trait::async_trait;
use infra_master::HolidayEntry;
use tracing::warn;

/// A provider of yearly holiday and make-up-day entries.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetch the entries published for `year`.
    async fn fetch(&self, year: i32) -> Result<Vec<HolidayEntry>, FeedError>;

    /// Fetch the entries for `year`, logging any failure and returning an
    /// empty list instead, so callers can skip the year.
    async fn fetch_or_empty(&self, year: i32) -> Vec<HolidayEntry> {
        match self.fetch(year).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(year, error = %e, "holiday data unavailable");
                Vec::new()
            }
        }
    }
}
