//! Yearly fetch, reconcile and replace loop.

use crate::{CliError, Result};
use adapter_feeds::HolidaySource;
use infra_master::Reconciler;
use infra_store::NonWorkdayStore;
use std::ops::RangeInclusive;
use tracing::{error, info, warn};

/// What happened to one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOutcome {
    /// Rows replaced in the store
    Written { rows: u64 },
    /// No holiday data; the store was not touched
    Skipped,
    /// The replace failed and was rolled back
    Failed,
}

/// Per-run tally, years in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: Vec<i32>,
    pub skipped: Vec<i32>,
    pub failed: Vec<i32>,
    pub rows: u64,
}

impl RunSummary {
    fn record(&mut self, year: i32, outcome: YearOutcome) {
        match outcome {
            YearOutcome::Written { rows } => {
                self.written.push(year);
                self.rows += rows;
            }
            YearOutcome::Skipped => self.skipped.push(year),
            YearOutcome::Failed => self.failed.push(year),
        }
    }
}

/// Sequential driver over a range of years.
pub struct Pipeline<'a> {
    source: &'a dyn HolidaySource,
    store: &'a dyn NonWorkdayStore,
    reconciler: Reconciler,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn HolidaySource,
        store: &'a dyn NonWorkdayStore,
        reconciler: Reconciler,
    ) -> Self {
        Self {
            source,
            store,
            reconciler,
        }
    }

    /// Ensure the schema once, then process every year in ascending order.
    ///
    /// Only a schema failure is returned as an error; per-year failures are
    /// logged and tallied in the summary.
    pub async fn run(&self, years: RangeInclusive<i32>) -> Result<RunSummary> {
        self.store.ensure_schema().await.map_err(CliError::Schema)?;

        let mut summary = RunSummary::default();
        for year in years {
            let outcome = self.process_year(year).await;
            summary.record(year, outcome);
        }

        info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            failed = summary.failed.len(),
            rows = summary.rows,
            "run complete"
        );
        Ok(summary)
    }

    /// Fetch, reconcile and replace a single year.
    pub async fn process_year(&self, year: i32) -> YearOutcome {
        info!(year, "processing year");

        let entries = self.source.fetch_or_empty(year).await;
        if entries.is_empty() {
            warn!(year, "no holiday data available, skipping");
            return YearOutcome::Skipped;
        }

        let rows = self.reconciler.compute_year(year, &entries);
        match self.store.replace_year(year, &rows).await {
            Ok(inserted) => {
                info!(year, inserted, "stored non-workdays");
                YearOutcome::Written { rows: inserted }
            }
            Err(e) => {
                error!(year, error = %e, "failed to store non-workdays");
                YearOutcome::Failed
            }
        }
    }
}
