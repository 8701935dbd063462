//! Header detection, campaign/date filtering, and column projection.

use crate::dates::{cell_date, DateRange};
use crate::error::{ExtractError, Result};
use crate::selector::ColumnSelector;
use chrono::NaiveDate;
use consolidado_sheet::{CellValue, Grid};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Column holding the campaign (event) name.
pub const CAMPAIGN_COLUMN: usize = 0;

/// Column holding the first day a row is valid. Read for filtering even
/// when the selector does not export it.
pub const VALIDITY_START_COLUMN: usize = 10;

/// Column holding the last day a row is valid.
pub const VALIDITY_END_COLUMN: usize = 11;

/// Text whose presence in the first cell marks the header row.
pub const HEADER_MARKER: &str = "EVENTO";

/// Trimmed, lowercased comparison key.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Index of the first row whose first cell contains [`HEADER_MARKER`],
/// compared case-insensitively.
pub fn find_header_row(grid: &Grid) -> Option<usize> {
    grid.rows().iter().position(|row| {
        row.get(CAMPAIGN_COLUMN)
            .is_some_and(|cell| cell.as_str().to_uppercase().contains(HEADER_MARKER))
    })
}

/// Campaign names normalized for comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignSet {
    names: HashSet<String>,
}

impl CampaignSet {
    /// Normalize `names`. Blank names are dropped so they never select
    /// rows with an empty campaign cell.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect();
        CampaignSet { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn matches(&self, row: &[CellValue]) -> bool {
        row.get(CAMPAIGN_COLUMN)
            .is_some_and(|cell| self.contains(&cell.as_str()))
    }
}

/// Filters a grid down to the rows of the selected campaigns whose validity
/// window overlaps a date range, then projects the configured columns.
#[derive(Debug, Clone)]
pub struct RowExtractor {
    campaigns: CampaignSet,
    range: DateRange,
    selector: ColumnSelector,
}

impl RowExtractor {
    pub fn new(campaigns: CampaignSet, range: DateRange, selector: ColumnSelector) -> Self {
        RowExtractor {
            campaigns,
            range,
            selector,
        }
    }

    /// Validity window of a data row, if both ends are dates.
    fn validity(row: &[CellValue]) -> Option<(NaiveDate, NaiveDate)> {
        let start = row.get(VALIDITY_START_COLUMN).and_then(cell_date)?;
        let end = row.get(VALIDITY_END_COLUMN).and_then(cell_date)?;
        Some((start, end))
    }

    fn keeps(&self, row: &[CellValue]) -> bool {
        if !self.campaigns.matches(row) {
            return false;
        }
        Self::validity(row).is_some_and(|(start, end)| self.range.overlaps(start, end))
    }

    /// Produce `[header, ...matching rows]`, every row projected through the
    /// selector. Rows keep their source order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::HeaderNotFound`] when no header row exists.
    pub fn extract(&self, grid: &Grid) -> Result<Grid> {
        let header_index = find_header_row(grid).ok_or(ExtractError::HeaderNotFound)?;
        let rows = grid.rows();

        let mut out = Grid::with_name(grid.name());
        out.push_row(self.selector.project(&rows[header_index]));

        let data = &rows[header_index + 1..];
        for row in data.iter().filter(|row| self.keeps(row)) {
            out.push_row(self.selector.project(row));
        }

        debug!(
            sheet = grid.name(),
            header_row = header_index,
            campaigns = self.campaigns.len(),
            scanned = data.len(),
            kept = out.row_count() - 1,
            "extracted campaign rows"
        );

        Ok(out)
    }
}

/// One-shot form of [`RowExtractor::extract`].
pub fn extract<I, S>(
    grid: &Grid,
    campaigns: I,
    range_start: NaiveDate,
    range_end: NaiveDate,
    selector: &ColumnSelector,
) -> Result<Grid>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RowExtractor::new(
        CampaignSet::new(campaigns),
        DateRange::new(range_start, range_end),
        selector.clone(),
    )
    .extract(grid)
}

/// Distinct campaign names found below the header, in first-seen order.
///
/// Names are trimmed and deduplicated by their normalized form; the first
/// spelling seen is the one returned. Blank cells are skipped.
///
/// # Errors
///
/// Returns [`ExtractError::HeaderNotFound`] when no header row exists.
pub fn list_campaigns(grid: &Grid) -> Result<Vec<String>> {
    let header_index = find_header_row(grid).ok_or(ExtractError::HeaderNotFound)?;

    let mut names: IndexMap<String, String> = IndexMap::new();
    for row in &grid.rows()[header_index + 1..] {
        let Some(cell) = row.get(CAMPAIGN_COLUMN) else {
            continue;
        };
        let name = cell.as_str().trim().to_string();
        if !name.is_empty() {
            names.entry(normalize(&name)).or_insert(name);
        }
    }

    Ok(names.into_values().collect())
}
