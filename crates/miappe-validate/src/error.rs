//! Error types for workbook validation.

use miappe_ingest::IngestError;
use miappe_model::{Category, Issue};
use miappe_standards::StandardsError;
use thiserror::Error;

/// Errors that abort a validation run.
///
/// Per-field failures are never errors; they are collected as [`Issue`]s.
/// The one exception is [`ValidateError::RecordRejected`], raised only under
/// the fail-fast policy.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Schema data is missing or references unknown labels.
    #[error("Standards error: {0}")]
    Standards(#[from] StandardsError),

    /// The workbook could not be read.
    #[error("Read error: {0}")]
    Ingest(#[from] IngestError),

    /// A record failed validation under the fail-fast policy.
    #[error("{category} record {record}{} rejected with {} issue(s)", row_suffix(.sheet_row), .issues.len())]
    RecordRejected {
        category: Category,
        /// Zero-based record index within the category table.
        record: usize,
        sheet_row: Option<usize>,
        issues: Vec<Issue>,
    },
}

fn row_suffix(sheet_row: &Option<usize>) -> String {
    sheet_row.map_or_else(String::new, |row| format!(" (row {row})"))
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
