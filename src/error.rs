use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Error type covering the failures that can occur while the dashboard reads
/// its record store, appends to it, or renders a report.
///
/// Malformed dates and amounts are not errors: the normalizer recovers them
/// locally with default values.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a store does not contain the requested sheet.
    #[error("sheet '{0}' not found in record store")]
    MissingSheet(String),

    /// Raised when the store file does not exist.
    #[error("record store not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when initialising a store would overwrite an existing file.
    #[error("record store already exists: {0}")]
    StoreExists(PathBuf),

    /// Raised when a submitted record carries a negative or non-finite amount.
    #[error("invalid amount '{0}': must be a finite number >= 0")]
    InvalidAmount(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
