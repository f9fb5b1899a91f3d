//! # infra_master
//!
//! Calendar master data for Offday: the per-year date enumeration, the
//! holiday/make-up-day data model, and the reconciliation that turns them
//! into the list of non-working days.
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer. Pure logic with no I/O; feeds and stores
//! depend on it, never the other way round.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use infra_master::{HolidayEntry, Reconciler};
//!
//! let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let entries = vec![HolidayEntry::holiday("New Year", new_year, new_year).unwrap()];
//!
//! let rows = Reconciler::default().compute_year(2025, &entries);
//! assert_eq!(rows[0].date, new_year);
//! assert_eq!(rows[0].description, "New Year");
//! ```

mod calendar;
mod entry;
mod error;
mod reconcile;

pub use calendar::{all_dates_of, is_weekend, year_bounds};
pub use entry::{HolidayEntry, HolidayKind, NonWorkday};
pub use error::MasterDataError;
pub use reconcile::{OverrideTable, Reconciler, WEEKEND_LABEL};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        all_dates_of, is_weekend, HolidayEntry, HolidayKind, MasterDataError, NonWorkday,
        Reconciler,
    };
}
