//! Error types for workbook reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a metadata workbook.
///
/// All of these abort the read: there is nothing to validate without the data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Workbook path does not exist.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path is neither a spreadsheet nor a directory of delimited sheets.
    #[error("unsupported workbook format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// The spreadsheet library could not open or parse the workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Failed to parse a delimited sheet.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Layout Errors ===
    /// A category sheet is absent from the workbook.
    #[error("sheet '{sheet}' not found in workbook")]
    MissingSheet { sheet: String },

    /// A required column is absent from a sheet.
    #[error("column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { column: String, sheet: String },

    /// Two headers normalize to the same field name.
    #[error("duplicate column '{column}' in sheet '{sheet}'")]
    DuplicateColumn { column: String, sheet: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
