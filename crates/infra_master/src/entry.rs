//! Holiday source entries and computed non-workday rows.

use crate::error::MasterDataError;
use chrono::NaiveDate;

/// What a [`HolidayEntry`] does to the days it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    /// Days off
    Holiday,
    /// Make-up working day: a weekend day turned back into a working day
    WorkingDay,
}

/// One named period from the holiday calendar.
///
/// The range is inclusive on both ends; a single-day entry has
/// `start == end`. Construction rejects `end < start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEntry {
    name: String,
    start: NaiveDate,
    end: NaiveDate,
    kind: HolidayKind,
}

impl HolidayEntry {
    /// Create an entry covering `start..=end`.
    pub fn new(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        kind: HolidayKind,
    ) -> Result<Self, MasterDataError> {
        let name = name.into();
        if end < start {
            return Err(MasterDataError::InvalidRange { name, start, end });
        }
        Ok(Self {
            name,
            start,
            end,
            kind,
        })
    }

    /// Create a [`HolidayKind::Holiday`] entry.
    pub fn holiday(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, MasterDataError> {
        Self::new(name, start, end, HolidayKind::Holiday)
    }

    /// Create a [`HolidayKind::WorkingDay`] entry.
    pub fn working_day(
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, MasterDataError> {
        Self::new(name, start, end, HolidayKind::WorkingDay)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn kind(&self) -> HolidayKind {
        self.kind
    }

    /// Every date covered by the entry, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// One computed non-working day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonWorkday {
    /// Calendar date
    pub date: NaiveDate,
    /// Holiday name, or the weekend label
    pub description: String,
}

impl NonWorkday {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_day_entry() {
        let entry = HolidayEntry::holiday("New Year", d(2025, 1, 1), d(2025, 1, 1)).unwrap();
        assert_eq!(entry.dates().collect::<Vec<_>>(), vec![d(2025, 1, 1)]);
    }

    #[test]
    fn test_range_is_inclusive() {
        let entry =
            HolidayEntry::holiday("Spring Festival", d(2025, 1, 28), d(2025, 2, 4)).unwrap();
        let dates: Vec<_> = entry.dates().collect();
        assert_eq!(dates.len(), 8);
        assert_eq!(dates.first(), Some(&d(2025, 1, 28)));
        assert_eq!(dates.last(), Some(&d(2025, 2, 4)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = HolidayEntry::working_day("Backwards", d(2025, 2, 8), d(2025, 2, 1));
        assert!(matches!(result, Err(MasterDataError::InvalidRange { .. })));
    }
}
