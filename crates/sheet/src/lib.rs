//! Cell grid module for consolidado
//!
//! Loads the first sheet of a spreadsheet export into a [`Grid`] of typed
//! cells and writes grids back out as CSV.
//!
//! # Examples
//!
//! ## Creating a grid from data
//!
//! ```
//! use consolidado_sheet::{CellValue, Grid};
//!
//! let grid = Grid::from_data(vec![
//!     vec!["EVENTO", "Inicio"],
//!     vec!["Acme", "2024-01-10"],
//! ]);
//!
//! assert_eq!(grid.row_count(), 2);
//! assert_eq!(grid.get(1, 0), Some(&CellValue::String("Acme".to_string())));
//! ```
//!
//! ## Writing CSV
//!
//! ```
//! use consolidado_sheet::Grid;
//!
//! let grid = Grid::from_data(vec![vec!["a", "b,c"]]);
//! assert_eq!(grid.to_csv_string().unwrap(), "a,\"b,c\"\n");
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use consolidado_sheet::Grid;
//!
//! let bytes = std::fs::read("export.xlsx").unwrap();
//! let grid = Grid::from_workbook_bytes(&bytes).unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod grid;
mod xlsx;

/// Re-export cell value type and its text formats.
pub use cell::{CellValue, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export grid type.
pub use grid::Grid;
