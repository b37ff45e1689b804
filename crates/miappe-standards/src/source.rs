//! Where schema tables come from.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use miappe_model::Category;

use crate::embedded;
use crate::error::{Result, StandardsError};

/// Environment variable naming a directory of `<Sheet name>_model.tsv` files.
pub const SCHEMA_DIR_ENV: &str = "MIAPPE_SCHEMA_DIR";

/// Backing store for per-category schema tables.
pub trait SchemaSource: Send + Sync + fmt::Debug {
    /// Human-readable location, used in logs and errors.
    fn location(&self) -> String;

    /// Raw tab-separated schema table for a category.
    fn read_table(&self, category: Category) -> Result<String>;
}

/// Tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl SchemaSource for EmbeddedSource {
    fn location(&self) -> String {
        format!("embedded MIAPPE {}", embedded::MIAPPE_VERSION)
    }

    fn read_table(&self, category: Category) -> Result<String> {
        Ok(embedded::schema_table(category).to_string())
    }
}

/// Tables read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the table for a category, whether or not it exists.
    pub fn table_path(&self, category: Category) -> PathBuf {
        self.root.join(embedded::schema_file_name(category))
    }
}

impl SchemaSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn read_table(&self, category: Category) -> Result<String> {
        let path = self.table_path(category);
        if !path.is_file() {
            return Err(StandardsError::SchemaNotFound {
                category,
                location: self.location(),
            });
        }
        std::fs::read_to_string(&path).map_err(|source| StandardsError::Io { path, source })
    }
}

/// Resolves the schema source: an explicit directory wins, then
/// `MIAPPE_SCHEMA_DIR`, then the embedded tables.
pub fn resolve_source(explicit: Option<&Path>) -> Arc<dyn SchemaSource> {
    if let Some(dir) = explicit {
        tracing::debug!(dir = %dir.display(), "using schema directory");
        return Arc::new(DirectorySource::new(dir));
    }
    match std::env::var_os(SCHEMA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => {
            tracing::debug!(dir = ?dir, "using schema directory from {}", SCHEMA_DIR_ENV);
            Arc::new(DirectorySource::new(dir))
        }
        _ => Arc::new(EmbeddedSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_has_every_category() {
        for category in Category::ALL {
            let table = EmbeddedSource.read_table(category).unwrap();
            assert!(table.starts_with("MIAPPE Check list\t"), "{category}");
        }
    }

    #[test]
    fn directory_reports_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let err = source.read_table(Category::Study).unwrap_err();
        assert!(matches!(
            err,
            StandardsError::SchemaNotFound {
                category: Category::Study,
                ..
            }
        ));
    }

    #[test]
    fn explicit_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let source = resolve_source(Some(dir.path()));
        assert_eq!(source.location(), dir.path().display().to_string());
    }
}
