//! # consolidado-extract
//!
//! Pulls the rows of selected campaigns out of a spreadsheet export, keeps
//! those whose validity window overlaps a date range, and projects a fixed
//! set of columns ready for CSV.
//!
//! The sheet layout is a fixed contract: the header row is the first row
//! whose first cell contains `EVENTO`, column 0 names the campaign, and
//! columns 10 and 11 hold each row's validity start and end dates.
//!
//! ```
//! use chrono::NaiveDate;
//! use consolidado_extract::{extract, ColumnSelector};
//! use consolidado_sheet::Grid;
//!
//! let mut rows = vec![vec!["Evento/Vigencias".to_string(); 12]];
//! let mut acme = vec![String::new(); 12];
//! acme[0] = "Acme".into();
//! acme[10] = "2024-01-10".into();
//! acme[11] = "2024-01-20".into();
//! rows.push(acme);
//!
//! let grid = Grid::from_data(rows);
//! let selector: ColumnSelector = "0-2".parse().unwrap();
//! let out = extract(
//!     &grid,
//!     ["acme"],
//!     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//!     &selector,
//! )
//! .unwrap();
//!
//! assert_eq!(out.row_count(), 2);
//! assert_eq!(out.col_count(), 2);
//! ```

mod dates;
mod error;
mod extractor;
mod selector;

pub use dates::{cell_date, parse_date, DateRange};
pub use error::{ExtractError, Result};
pub use extractor::{
    extract, find_header_row, list_campaigns, CampaignSet, RowExtractor, CAMPAIGN_COLUMN,
    HEADER_MARKER, VALIDITY_END_COLUMN, VALIDITY_START_COLUMN,
};
pub use selector::{ColumnRange, ColumnSelector, Preset, PRESET_COMPACT, PRESET_FULL};

use consolidado_sheet::Grid;

/// Load the first sheet of a workbook, extract the matching rows, and
/// return them as CSV text.
///
/// `range_start` and `range_end` are parsed with the same rules as row
/// dates and are checked before the workbook is read.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidDate`] for an unparseable range end,
/// [`ExtractError::HeaderNotFound`] when the sheet has no header row, and
/// [`ExtractError::Sheet`] when the workbook cannot be read.
pub fn extract_campaign_data<S: AsRef<str>>(
    file_bytes: &[u8],
    selected_campaigns: &[S],
    range_start: &str,
    range_end: &str,
    selector: &ColumnSelector,
) -> Result<String> {
    let range = DateRange::parse(range_start, range_end)?;
    let grid = Grid::from_workbook_bytes(file_bytes)?;

    let extractor = RowExtractor::new(
        CampaignSet::new(selected_campaigns),
        range,
        selector.clone(),
    );
    let out = extractor.extract(&grid)?;

    Ok(out.to_csv_string()?)
}
