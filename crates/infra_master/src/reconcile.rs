//! Reconciliation of weekends with holiday and make-up-day overrides.

use crate::calendar::{all_dates_of, is_weekend};
use crate::entry::{HolidayEntry, HolidayKind, NonWorkday};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Description written for a weekend day that carries no holiday name.
pub const WEEKEND_LABEL: &str = "weekend";

/// Holiday names and make-up working days, expanded to single dates.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    holidays: HashMap<NaiveDate, String>,
    working_days: HashSet<NaiveDate>,
}

impl OverrideTable {
    /// Expand every entry into per-date lookups.
    ///
    /// When several holiday entries cover the same date the first-declared
    /// name is kept.
    pub fn from_entries(entries: &[HolidayEntry]) -> Self {
        let mut table = Self::default();
        for entry in entries {
            match entry.kind() {
                HolidayKind::Holiday => {
                    for date in entry.dates() {
                        table
                            .holidays
                            .entry(date)
                            .or_insert_with(|| entry.name().to_string());
                    }
                }
                HolidayKind::WorkingDay => table.working_days.extend(entry.dates()),
            }
        }
        table
    }

    /// Holiday name for `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Check if `date` is a make-up working day.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.working_days.contains(&date)
    }

    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    pub fn working_day_count(&self) -> usize {
        self.working_days.len()
    }
}

/// Merges the weekend calendar with holiday overrides.
#[derive(Debug, Clone)]
pub struct Reconciler {
    weekend_label: String,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            weekend_label: WEEKEND_LABEL.to_string(),
        }
    }
}

impl Reconciler {
    /// Reconciler that labels plain weekend days with `weekend_label`.
    pub fn with_weekend_label(weekend_label: impl Into<String>) -> Self {
        Self {
            weekend_label: weekend_label.into(),
        }
    }

    pub fn weekend_label(&self) -> &str {
        &self.weekend_label
    }

    /// Non-working days among `all_dates`, in input order.
    ///
    /// A date qualifies when it is a weekend or a holiday, unless it is a
    /// make-up working day. The holiday name takes precedence over the
    /// weekend label. Repeated input dates are emitted once.
    pub fn compute<I>(&self, all_dates: I, entries: &[HolidayEntry]) -> Vec<NonWorkday>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let table = OverrideTable::from_entries(entries);
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for date in all_dates {
            if !seen.insert(date) {
                continue;
            }

            let holiday = table.holiday_name(date);
            if !is_weekend(date) && holiday.is_none() {
                continue;
            }
            if table.is_working_day(date) {
                continue;
            }

            let description = holiday.unwrap_or(self.weekend_label.as_str());
            result.push(NonWorkday::new(date, description));
        }

        result
    }

    /// Non-working days of a whole year, ascending.
    pub fn compute_year(&self, year: i32, entries: &[HolidayEntry]) -> Vec<NonWorkday> {
        self.compute(all_dates_of(year), entries)
    }
}
