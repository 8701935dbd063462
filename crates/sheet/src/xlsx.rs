use crate::cell::CellValue;
use crate::error::Result;
use crate::grid::Grid;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::io::{Cursor, Read, Seek};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Day zero of the Excel serial date system
fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert an Excel serial (days since 1899-12-30) to a date, date-time, or
/// time of day. Whole serials become plain dates; serials below one carry no
/// calendar day and become times.
fn serial_to_cell_value(serial: f64) -> CellValue {
    if !serial.is_finite() {
        return CellValue::Float(serial);
    }

    if (0.0..1.0).contains(&serial) {
        let seconds = ((serial * SECONDS_PER_DAY).round() as u32) % 86_400;
        return NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
            .map_or(CellValue::Float(serial), CellValue::Time);
    }

    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    let Some(datetime) =
        TimeDelta::try_seconds(seconds).and_then(|delta| excel_epoch().checked_add_signed(delta))
    else {
        return CellValue::Float(serial);
    };

    if seconds % 86_400 == 0 {
        CellValue::Date(datetime.date())
    } else {
        CellValue::DateTime(datetime)
    }
}

/// Elapsed-time cells (`[h]:mm:ss`) as `HH:MM:SS` text; hours may exceed 24.
fn duration_to_cell_value(days: f64) -> CellValue {
    if !days.is_finite() {
        return CellValue::Float(days);
    }

    let total = (days * SECONDS_PER_DAY).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    CellValue::String(format!(
        "{sign}{:02}:{:02}:{:02}",
        total / 3600,
        total % 3600 / 60,
        total % 60
    ))
}

/// ODS and strict xlsx files carry dates as ISO text
fn iso_to_cell_value(s: &str) -> CellValue {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        if dt.time() == NaiveTime::MIN {
            return CellValue::Date(dt.date());
        }
        return CellValue::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    CellValue::String(s.to_string())
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) if dt.is_duration() => duration_to_cell_value(dt.as_f64()),
        Data::DateTime(dt) => serial_to_cell_value(dt.as_f64()),
        Data::DateTimeIso(s) => iso_to_cell_value(s),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

/// Build a grid anchored at A1.
///
/// calamine trims the used range to the first non-empty cell, so leading
/// rows and columns are restored to keep absolute column indices stable.
fn range_to_grid(range: &Range<Data>, name: &str) -> Grid {
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(r, c)| (r as usize, c as usize));

    let mut grid = Grid::with_name(name);
    for _ in 0..row_offset {
        grid.push_row(Vec::new());
    }

    for row in range.rows() {
        let mut cells = vec![CellValue::Null; col_offset];
        cells.extend(row.iter().map(data_to_cell_value));
        grid.push_row(cells);
    }

    grid
}

/// Read the first worksheet of an opened workbook
fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Grid> {
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .unwrap_or_default();

    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(range_to_grid(&range?, &name)),
        None => Ok(Grid::with_name(&name)),
    }
}

impl Grid {
    /// Load the first sheet of a workbook held in memory.
    ///
    /// The format (xlsx, xlsm, xlsb, xls, ods) is detected from the bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a readable workbook.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        first_sheet(&mut workbook)
    }
}
