//! MIAPPE metadata validation.
//!
//! This crate turns category schemas into sheet validators and runs them
//! over every record of a workbook.
//!
//! # Structure
//!
//! - [`validators`]: field validators (DOI, country, URL, key-value list, ...)
//!   and cardinality counting
//! - [`SheetValidator`]: compiled rules for one category, plus JSON Schema export
//! - [`ValidatorFactory`]: cached per-category validator construction
//! - [`MetadataIo`]: workbook reading and whole-file validation
//!
//! # Failure Handling
//!
//! Configuration problems (unknown labels, missing schema) and read errors
//! abort with [`ValidateError`]. Field failures never do: each record yields a
//! [`ValidationOutcome`](miappe_model::ValidationOutcome), collected into a
//! [`ValidationReport`]. [`FailurePolicy::FailFast`] turns the first rejected
//! record into an error instead.

mod error;
mod factory;
mod metadata_io;
mod report;
mod sheet;
pub mod validators;

// === Error Types ===
pub use error::{Result, ValidateError};

// === Sheet Validators ===
pub use factory::{ValidatorFactory, default_factory};
pub use sheet::{FieldRule, SheetValidator};

// === Workbook Validation ===
pub use metadata_io::{FailurePolicy, MetadataIo, MetadataIoOptions};
pub use report::{CategorySummary, RecordOutcome, ValidationReport};

// === Field Validators ===
pub use validators::{CardinalityError, DEFAULT_DELIMITER, FieldValidationError};
