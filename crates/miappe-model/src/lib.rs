//! Core types for MIAPPE metadata: categories, schemas, records and issues.

pub mod category;
pub mod error;
pub mod issue;
pub mod schema;
pub mod value;

pub use category::Category;
pub use error::{ModelError, Result};
pub use issue::{Issue, ValidationOutcome};
pub use schema::{
    CardinalityRule, CategorySchema, FieldSchema, FormatCheck, FormatRule, PrimitiveType,
    normalize_field_name,
};
pub use value::{FieldValue, Temporal, ValidatedRecord, ValidationRecord};
