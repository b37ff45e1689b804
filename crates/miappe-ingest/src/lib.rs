//! MIAPPE workbook ingestion.
//!
//! This crate reads a metadata workbook and turns each category sheet into a
//! Polars table of string columns keyed by normalized field name.
//!
//! # Features
//!
//! - **Spreadsheets**: xlsx, xlsm, xlsb, xls and ods through calamine
//! - **Delimited directories**: one `<Sheet name>.tsv` or `.csv` per sheet
//! - **Layouts**: transposed Investigation sheet, row-oriented everything else
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use miappe_ingest::{Workbook, read_tables, DEFAULT_VALUE_INDEX};
//!
//! let workbook = Workbook::open(Path::new("metadata.xlsx"))?;
//! let tables = read_tables(&workbook, DEFAULT_VALUE_INDEX)?;
//! for (category, table) in &tables {
//!     println!("{category}: {} records", table.len());
//! }
//! ```

mod error;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Workbook Sources ===
pub use workbook::{RawSheet, Workbook, cell_to_string};

// === Category Tables ===
pub use table::{CategoryTable, DEFAULT_VALUE_INDEX, read_category_table, read_tables};
