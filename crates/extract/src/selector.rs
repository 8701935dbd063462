//! Column selection: which source columns are copied into an output row,
//! and in what order.

use crate::error::{ExtractError, Result};
use consolidado_sheet::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A half-open range of column indices, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct ColumnRange {
    start: usize,
    end: usize,
}

impl ColumnRange {
    /// Create a range without validation. `start` must not exceed `end`.
    pub const fn new(start: usize, end: usize) -> Self {
        ColumnRange { start, end }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of columns the range contributes to an output row.
    pub const fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

impl TryFrom<(usize, usize)> for ColumnRange {
    type Error = ExtractError;

    fn try_from((start, end): (usize, usize)) -> Result<Self> {
        if start > end {
            return Err(ExtractError::InvalidSelector(format!(
                "range start {start} is past its end {end}"
            )));
        }
        Ok(ColumnRange { start, end })
    }
}

impl From<ColumnRange> for (usize, usize) {
    fn from(range: ColumnRange) -> Self {
        (range.start, range.end)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// Source layout (0-based):
//   0..9    event/campaign block, column 0 is the campaign name
//   10..13  validity start (10), validity end (11), and the column after
//   15..79  detail blocks exported per preset

/// Wide export. The `[15, 42)` block appears twice; downstream consumers
/// of this layout rely on the repeated columns, so it is kept as is.
pub const PRESET_FULL: &[ColumnRange] = &[
    ColumnRange::new(0, 9),
    ColumnRange::new(10, 13),
    ColumnRange::new(15, 42),
    ColumnRange::new(15, 42),
    ColumnRange::new(47, 49),
    ColumnRange::new(50, 52),
    ColumnRange::new(52, 56),
    ColumnRange::new(57, 61),
    ColumnRange::new(62, 64),
    ColumnRange::new(65, 79),
];

/// Narrow export.
pub const PRESET_COMPACT: &[ColumnRange] = &[
    ColumnRange::new(0, 9),
    ColumnRange::new(10, 13),
    ColumnRange::new(15, 42),
    ColumnRange::new(47, 52),
    ColumnRange::new(52, 53),
    ColumnRange::new(53, 55),
    ColumnRange::new(56, 58),
    ColumnRange::new(58, 60),
    ColumnRange::new(61, 63),
];

/// Named column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Full,
    Compact,
}

impl Preset {
    pub fn ranges(self) -> &'static [ColumnRange] {
        match self {
            Preset::Full => PRESET_FULL,
            Preset::Compact => PRESET_COMPACT,
        }
    }
}

/// An ordered list of column ranges applied to every output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSelector {
    ranges: Vec<ColumnRange>,
}

impl ColumnSelector {
    /// Build a selector from `(start, end)` pairs.
    pub fn new<I>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let ranges = ranges
            .into_iter()
            .map(ColumnRange::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(ColumnSelector { ranges })
    }

    pub fn preset(preset: Preset) -> Self {
        ColumnSelector {
            ranges: preset.ranges().to_vec(),
        }
    }

    /// Parse a JSON array of `[start, end]` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::InvalidSelector(e.to_string()))
    }

    pub fn ranges(&self) -> &[ColumnRange] {
        &self.ranges
    }

    /// Cell count of every projected row.
    pub fn width(&self) -> usize {
        self.ranges.iter().map(ColumnRange::width).sum()
    }

    /// Copy the selected cells out of `row`, in range order.
    /// Positions past the end of `row` become empty cells.
    pub fn project(&self, row: &[CellValue]) -> Vec<CellValue> {
        let mut out = Vec::with_capacity(self.width());
        for range in &self.ranges {
            out.extend(
                (range.start..range.end).map(|i| row.get(i).cloned().unwrap_or(CellValue::Null)),
            );
        }
        out
    }
}

impl From<Preset> for ColumnSelector {
    fn from(preset: Preset) -> Self {
        ColumnSelector::preset(preset)
    }
}

impl Default for ColumnSelector {
    fn default() -> Self {
        ColumnSelector::preset(Preset::default())
    }
}

/// Parses `"0-9,10-13"`: comma separated `start-end` pairs, end exclusive.
impl FromStr for ColumnSelector {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(ExtractError::InvalidSelector("no ranges given".to_string()));
        }

        let pairs = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                let (start, end) = part.split_once('-').ok_or_else(|| {
                    ExtractError::InvalidSelector(format!("expected START-END, got '{part}'"))
                })?;
                let parse = |n: &str| {
                    n.trim().parse::<usize>().map_err(|_| {
                        ExtractError::InvalidSelector(format!("'{}' is not a column index", n.trim()))
                    })
                };
                Ok((parse(start)?, parse(end)?))
            })
            .collect::<Result<Vec<_>>>()?;

        ColumnSelector::new(pairs)
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}
