//! Error types for schema loading and registry lookups.

use std::path::PathBuf;

use miappe_model::Category;
use thiserror::Error;

/// Configuration errors: the schema data itself is broken or missing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Format label outside the fixed registry.
    #[error("Unknown format label '{label}'")]
    UnknownFormat { label: String },

    /// Cardinality label outside the fixed registry.
    #[error("Unknown cardinality label '{label}'")]
    UnknownCardinality { label: String },

    /// No schema table exists for the category.
    #[error("Schema for {category} not found in {location}")]
    SchemaNotFound { category: Category, location: String },

    /// The schema table could not be parsed.
    #[error("Failed to parse {category} schema: {message}")]
    SchemaParse { category: Category, message: String },

    /// Two schema rows normalize to the same field name.
    #[error("Duplicate field '{name}' in {category} schema")]
    DuplicateField { category: Category, name: String },

    /// Failed to parse an embedded reference table.
    #[error("Failed to parse {file}: {message}")]
    CsvParse { file: String, message: String },

    /// Failed to read a schema file from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for standards operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
