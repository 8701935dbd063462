use crate::cell::CellValue;

/// Ordered rows of cells read from a single sheet.
///
/// Rows may be ragged; a cell past the end of its row reads as missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Create an empty grid
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create an empty grid with the given sheet name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Grid {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a grid from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        Self::from_rows(
            data.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Create a grid from rows that are already cell values
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Grid {
            name: "Sheet1".to_string(),
            data: rows,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all rows
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    /// Get a row by index (0-based)
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Get a cell by row and column index (0-based).
    /// Cells beyond a short row are `None`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.data.push(row);
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the width of the widest row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the grid has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that every row has the same number of cells
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        match self.data.first() {
            Some(first) => self.data.iter().all(|row| row.len() == first.len()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let grid = Grid::from_data(vec![vec!["Evento", "Inicio"], vec!["Acme", "x"]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.get(1, 0), Some(&CellValue::String("Acme".to_string())));
    }

    #[test]
    fn test_ragged_rows() {
        let grid = Grid::from_rows(vec![
            vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
            vec![CellValue::Int(4)],
        ]);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.get(1, 2), None);
        assert_eq!(grid.get(5, 0), None);
        assert!(!grid.is_rectangular());
    }

    #[test]
    fn test_empty_grid_is_rectangular() {
        let grid = Grid::new();
        assert!(grid.is_empty());
        assert!(grid.is_rectangular());
        assert_eq!(grid.col_count(), 0);
        assert_eq!(grid.name(), "Sheet1");
    }
}
