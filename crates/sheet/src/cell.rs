use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Format used when a date cell is rendered as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used when a date-time cell is rendered as text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when a time-of-day cell is rendered as text.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Represents a cell value in a grid
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Time of day with no calendar date
    Time(NaiveTime),
}

impl CellValue {
    /// Get the calendar date of a native date or date-time cell.
    ///
    /// Text is not parsed here; see the extractor's date rules for that.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            CellValue::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
            CellValue::Time(t) => t.format(TIME_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(t: NaiveTime) -> Self {
        CellValue::Time(t)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_rendering() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(CellValue::Null.as_str(), "");
        assert_eq!(CellValue::Float(45.0).as_str(), "45");
        assert_eq!(CellValue::Float(0.5).as_str(), "0.5");
        assert_eq!(CellValue::Date(date).as_str(), "2024-01-10");
        assert_eq!(
            CellValue::DateTime(date.and_hms_opt(8, 30, 0).unwrap()).as_str(),
            "2024-01-10 08:30:00"
        );
        assert_eq!(
            CellValue::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap()).as_str(),
            "08:30:00"
        );
    }

    #[test]
    fn test_as_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(CellValue::Date(date).as_date(), Some(date));
        assert_eq!(
            CellValue::DateTime(date.and_hms_opt(23, 59, 59).unwrap()).as_date(),
            Some(date)
        );
        assert_eq!(CellValue::String("2024-03-01".into()).as_date(), None);
        assert_eq!(CellValue::Float(45352.0).as_date(), None);
        assert_eq!(CellValue::from(NaiveTime::MIN).as_date(), None);
    }
}
