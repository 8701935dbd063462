//! Error types for campaign extraction.

use consolidado_sheet::SheetError;
use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting campaign rows.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No row's first cell contains the header marker.
    #[error("header row 'EVENTO/VIGENCIAS' not found")]
    HeaderNotFound,

    /// A caller-supplied range boundary is not a calendar date.
    #[error("invalid date: '{value}'")]
    InvalidDate { value: String },

    /// A column selector is malformed.
    #[error("invalid column selector: {0}")]
    InvalidSelector(String),

    /// Loading the workbook or writing CSV failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}
