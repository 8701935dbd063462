//! Calendar date parsing and range overlap.

use crate::error::{ExtractError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use consolidado_sheet::CellValue;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse text as a calendar date; any time of day is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Read a cell as a calendar date.
///
/// Native date cells and date-like text qualify. Numbers do not: a bare
/// serial cannot be told apart from any other figure.
pub fn cell_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(_) | CellValue::DateTime(_) => cell.as_date(),
        CellValue::String(s) => parse_date(s),
        _ => None,
    }
}

/// Caller-supplied filter window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Parse both ends with the same rules applied to row dates.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let parse = |value: &str| {
            parse_date(value).ok_or_else(|| ExtractError::InvalidDate {
                value: value.to_string(),
            })
        };
        Ok(DateRange::new(parse(start)?, parse(end)?))
    }

    /// Interval intersection: true when `[row_start, row_end]` shares at
    /// least one day with this range.
    pub fn overlaps(&self, row_start: NaiveDate, row_end: NaiveDate) -> bool {
        row_start <= self.end && row_end >= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Some(date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date(" 2024/01/15 "), expected);
        assert_eq!(parse_date("01/15/2024"), expected);
        assert_eq!(parse_date("2024-01-15T08:00:00"), expected);
        assert_eq!(parse_date("2024-01-15T08:00:00.250"), expected);
        assert_eq!(parse_date("2024-01-15 23:59"), expected);
        assert_eq!(parse_date("2024-01-15T23:30:00-05:00"), expected);
    }

    #[test]
    fn test_parse_date_rejects() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("pendiente"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("15/13/2024"), None);
    }

    #[test]
    fn test_cell_date() {
        let d = date(2024, 1, 10);
        assert_eq!(cell_date(&CellValue::Date(d)), Some(d));
        assert_eq!(
            cell_date(&CellValue::DateTime(d.and_hms_opt(17, 0, 0).unwrap())),
            Some(d)
        );
        assert_eq!(cell_date(&CellValue::String("2024-01-10".into())), Some(d));
        assert_eq!(cell_date(&CellValue::Float(45_301.0)), None);
        assert_eq!(cell_date(&CellValue::Null), None);
    }

    #[test]
    fn test_overlap_law() {
        let (row_start, row_end) = (date(2024, 1, 10), date(2024, 1, 20));

        let partial = DateRange::new(date(2024, 1, 15), date(2024, 2, 1));
        let disjoint = DateRange::new(date(2024, 2, 1), date(2024, 2, 10));
        let containing = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        let touching = DateRange::new(date(2024, 1, 20), date(2024, 1, 20));
        let inside = DateRange::new(date(2024, 1, 12), date(2024, 1, 13));

        assert!(partial.overlaps(row_start, row_end));
        assert!(!disjoint.overlaps(row_start, row_end));
        assert!(containing.overlaps(row_start, row_end));
        assert!(touching.overlaps(row_start, row_end));
        assert!(inside.overlaps(row_start, row_end));
    }

    #[test]
    fn test_range_parse() {
        let range = DateRange::parse("2024-01-01", "2024-12-31").unwrap();
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 12, 31)));

        let err = DateRange::parse("2024-01-01", "fin de año").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDate { value } if value == "fin de año"));
    }
}
