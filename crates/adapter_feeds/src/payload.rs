//! Yearly holiday JSON payload.
//!
//! The feed publishes one file per year: a JSON array of records such as
//!
//! ```json
//! [
//!   { "name": "New Year", "range": ["2025-01-01"], "type": "holiday" },
//!   { "name": "Spring Festival", "range": ["2025-01-28", "2025-02-04"], "type": "holiday" },
//!   { "name": "Spring Festival", "range": ["2025-02-08"], "type": "workingday" }
//! ]
//! ```

use crate::error::FeedError;
use chrono::NaiveDate;
use infra_master::{HolidayEntry, HolidayKind};
use serde::Deserialize;
use tracing::warn;

/// Record type tag as published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawKind {
    Holiday,
    WorkingDay,
    /// Any other tag; such records are skipped.
    #[serde(other)]
    Unknown,
}

/// One record of the payload before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHolidayRecord {
    pub name: String,
    /// One date, or an inclusive start and end.
    pub range: Vec<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: RawKind,
}

impl RawHolidayRecord {
    fn into_entry(self, index: usize) -> Result<Option<HolidayEntry>, FeedError> {
        let kind = match self.kind {
            RawKind::Holiday => HolidayKind::Holiday,
            RawKind::WorkingDay => HolidayKind::WorkingDay,
            RawKind::Unknown => {
                warn!(index, name = %self.name, "skipping record with unknown type tag");
                return Ok(None);
            }
        };

        let (start, end) = match self.range.as_slice() {
            [single] => (*single, *single),
            [start, end] => (*start, *end),
            other => {
                return Err(FeedError::MalformedRecord {
                    index,
                    name: self.name,
                    message: format!("range must hold 1 or 2 dates, got {}", other.len()),
                })
            }
        };

        HolidayEntry::new(self.name.clone(), start, end, kind)
            .map(Some)
            .map_err(|e| FeedError::MalformedRecord {
                index,
                name: self.name,
                message: e.to_string(),
            })
    }
}

/// Parse a yearly payload into validated entries, in declaration order.
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<HolidayEntry>, FeedError> {
    let records: Vec<RawHolidayRecord> = serde_json::from_slice(bytes)?;

    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if let Some(entry) = record.into_entry(index)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_single_and_ranged_records() {
        let json = br#"[
            {"name": "New Year", "range": ["2025-01-01"], "type": "holiday"},
            {"name": "Spring Festival", "range": ["2025-01-26"], "type": "workingday"},
            {"name": "Spring Festival", "range": ["2025-01-28", "2025-02-04"], "type": "holiday"}
        ]"#;

        let entries = parse_payload(json).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name(), "New Year");
        assert_eq!(entries[0].start(), d(2025, 1, 1));
        assert_eq!(entries[0].end(), d(2025, 1, 1));

        assert_eq!(entries[1].kind(), HolidayKind::WorkingDay);

        assert_eq!(entries[2].start(), d(2025, 1, 28));
        assert_eq!(entries[2].end(), d(2025, 2, 4));
    }

    #[test]
    fn test_empty_array_is_empty() {
        assert!(parse_payload(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_skipped() {
        let json = br#"[
            {"name": "Observance", "range": ["2025-03-08"], "type": "observance"},
            {"name": "New Year", "range": ["2025-01-01"], "type": "holiday"}
        ]"#;
        let entries = parse_payload(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "New Year");
    }

    #[test]
    fn test_empty_range_rejected() {
        let json = br#"[{"name": "Nothing", "range": [], "type": "holiday"}]"#;
        let result = parse_payload(json);
        assert!(matches!(result, Err(FeedError::MalformedRecord { index: 0, .. })));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = br#"[
            {"name": "Fine", "range": ["2025-01-01"], "type": "holiday"},
            {"name": "Backwards", "range": ["2025-02-04", "2025-01-28"], "type": "holiday"}
        ]"#;
        let result = parse_payload(json);
        assert!(matches!(result, Err(FeedError::MalformedRecord { index: 1, .. })));
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let json = br#"[{"name": "Typo", "range": ["2025-13-01"], "type": "holiday"}]"#;
        assert!(matches!(parse_payload(json), Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_not_an_array_is_parse_error() {
        assert!(matches!(
            parse_payload(b"<html>404</html>"),
            Err(FeedError::Parse(_))
        ));
    }
}
