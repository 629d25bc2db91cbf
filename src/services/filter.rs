//! Date-range visibility filter
//!
//! Visibility is a pure function of a record and an optional inclusive range.
//! Both ends are inclusive at day granularity: a record dated on the end day
//! is visible however late in that day it was entered.

use std::fmt;

use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::models::Record;

/// An inclusive range of calendar days; a missing bound leaves that side open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a closed range. A start after the end is allowed and matches nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Create a range from optional bounds; `None` when both are missing
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        if start.is_none() && end.is_none() {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// True when no date can fall inside the range
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{}", start)?,
            None => f.write_str("beginning")?,
        }
        f.write_str(" to ")?;
        match self.end {
            Some(end) => write!(f, "{}", end),
            None => f.write_str("end"),
        }
    }
}

/// Decide whether a record passes the range
///
/// With no range every record is visible and the date is not inspected.
/// A stored date that cannot be read is an error.
pub fn is_visible(record: &Record, range: Option<&DateRange>, date_format: &str) -> TrackerResult<bool> {
    match range {
        None => Ok(true),
        Some(range) => Ok(range.contains(record.parsed_date(date_format)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kind, Money};

    const FORMAT: &str = "%Y-%m-%d";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(d: NaiveDate) -> Record {
        Record::new(d, FORMAT, "Coffee", "Groceries", Kind::Expense, Money::from_cents(350), "")
    }

    #[test]
    fn test_end_day_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));

        assert!(is_visible(&dated(date(2025, 1, 31)), Some(&range), FORMAT).unwrap());
        assert!(!is_visible(&dated(date(2025, 2, 1)), Some(&range), FORMAT).unwrap());
    }

    #[test]
    fn test_start_day_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));

        assert!(is_visible(&dated(date(2025, 1, 1)), Some(&range), FORMAT).unwrap());
        assert!(!is_visible(&dated(date(2024, 12, 31)), Some(&range), FORMAT).unwrap());
    }

    #[test]
    fn test_no_range_shows_everything() {
        let mut record = dated(date(2025, 1, 1));
        record.date = "not a date".into();
        assert!(is_visible(&record, None, FORMAT).unwrap());
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let range = DateRange::new(date(2025, 2, 1), date(2025, 1, 1));
        assert!(range.is_empty());
        assert!(!is_visible(&dated(date(2025, 1, 15)), Some(&range), FORMAT).unwrap());
        assert!(!is_visible(&dated(date(2025, 2, 1)), Some(&range), FORMAT).unwrap());
    }

    #[test]
    fn test_unreadable_date_is_an_error() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));
        let mut record = dated(date(2025, 1, 1));
        record.date = "31st of never".into();

        let err = is_visible(&record, Some(&range), FORMAT).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_bounds() {
        assert_eq!(DateRange::from_bounds(None, None), None);

        let open_end = DateRange::from_bounds(Some(date(2025, 1, 1)), None).unwrap();
        assert!(open_end.contains(date(2100, 1, 1)));
        assert!(!open_end.contains(date(2024, 12, 31)));

        let open_start = DateRange::from_bounds(None, Some(date(2025, 1, 1))).unwrap();
        assert!(open_start.contains(date(1900, 1, 1)));
        assert_eq!(open_start.start(), None);
        assert!(!open_start.is_empty());
    }

    #[test]
    fn test_display_names_open_bounds() {
        let closed = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(closed.to_string(), "2025-01-01 to 2025-01-31");

        let open_start = DateRange::from_bounds(None, Some(date(2025, 3, 1))).unwrap();
        assert_eq!(open_start.to_string(), "beginning to 2025-03-01");

        let open_end = DateRange::from_bounds(Some(date(2025, 3, 1)), None).unwrap();
        assert_eq!(open_end.to_string(), "2025-03-01 to end");
    }
}
