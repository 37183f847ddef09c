//! Spreadsheet import and export.
//!
//! Uploaded workbooks are first flattened into rows of optional cell strings
//! ([`reader`]); the per-entity modules map those rows onto record fields,
//! collecting warnings for values they had to default or drop. Exports and
//! import templates are written as `.xlsx` with `rust_xlsxwriter`.

use thiserror::Error;

pub mod columns;
pub mod companies;
pub mod deals;
pub mod reader;
mod writer;

/// Content type of generated workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One worksheet row; `None` marks an empty cell.
pub type Row = Vec<Option<String>>;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Please select a valid spreadsheet file (.xlsx, .xls or .csv)")]
    UnsupportedFormat,

    #[error("No worksheets found in the file")]
    NoWorksheet,

    #[error("File must contain at least a header row and one data row")]
    TooFewRows,

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("No valid {entity} data found in the file")]
    NoValidRows {
        entity: &'static str,
        warnings: Vec<String>,
    },

    #[error("Unknown export column: {0}")]
    UnknownColumn(String),

    #[error("Failed to read spreadsheet: {0}")]
    Read(String),

    #[error("Failed to write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

/// Records recovered from a sheet plus the warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet<T> {
    pub records: Vec<T>,
    pub warnings: Vec<String>,
}

/// 1-based row number as shown by spreadsheet programs.
pub(crate) fn display_row(index: usize) -> usize {
    index + 1
}

/// Value of the cell at `index`, if present and non-blank.
pub(crate) fn cell(row: &Row, index: usize) -> Option<&str> {
    row.get(index)
        .and_then(|value| value.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
