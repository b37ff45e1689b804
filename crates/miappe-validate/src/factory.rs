//! Sheet validator factory with a per-category cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use miappe_model::Category;
use miappe_standards::{SchemaLoader, resolve_source};

use crate::sheet::SheetValidator;
use crate::validators::DEFAULT_DELIMITER;

/// Builds and caches one [`SheetValidator`] per category.
///
/// # Thread Safety
///
/// The factory is `Send + Sync`. Building the same category twice from
/// different threads yields equal validators; the first one stored wins.
#[derive(Debug)]
pub struct ValidatorFactory {
    loader: SchemaLoader,
    delimiter: char,
    cache: RwLock<HashMap<Category, Arc<SheetValidator>>>,
}

impl Default for ValidatorFactory {
    fn default() -> Self {
        Self::new(SchemaLoader::default())
    }
}

impl ValidatorFactory {
    pub fn new(loader: SchemaLoader) -> Self {
        Self {
            loader,
            delimiter: DEFAULT_DELIMITER,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Factory over the resolved schema source: `schema_dir` if given,
    /// otherwise `MIAPPE_SCHEMA_DIR`, otherwise the embedded tables.
    pub fn from_schema_dir(schema_dir: Option<&Path>) -> Self {
        Self::new(SchemaLoader::new(resolve_source(schema_dir)))
    }

    /// Sets the separator of multi-valued fields.
    ///
    /// Clears any validators already compiled with the previous delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn loader(&self) -> &SchemaLoader {
        &self.loader
    }

    /// Returns the validator for a category, compiling it on first use.
    ///
    /// Unknown format or cardinality labels, and a missing schema, are
    /// configuration errors and propagate.
    pub fn build(&self, category: Category) -> miappe_standards::Result<Arc<SheetValidator>> {
        if let Some(validator) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
        {
            return Ok(Arc::clone(validator));
        }

        let schema = self.loader.load(category)?;
        let validator = Arc::new(SheetValidator::build_with_delimiter(
            &schema,
            self.delimiter,
        )?);
        tracing::debug!(%category, fields = validator.fields().len(), "compiled sheet validator");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(category).or_insert(validator)))
    }

    /// Drops the cached validator and schema of one category.
    pub fn invalidate(&self, category: Category) -> bool {
        let removed = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&category)
            .is_some();
        self.loader.invalidate(category) || removed
    }

    /// Drops every cached validator and schema.
    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.loader.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Process-wide factory.
static DEFAULT_FACTORY: OnceLock<Arc<ValidatorFactory>> = OnceLock::new();

/// Returns the shared factory, created on first access from
/// `MIAPPE_SCHEMA_DIR` or the embedded tables.
pub fn default_factory() -> Arc<ValidatorFactory> {
    Arc::clone(DEFAULT_FACTORY.get_or_init(|| Arc::new(ValidatorFactory::from_schema_dir(None))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_is_cached() {
        let factory = ValidatorFactory::default();
        let first = factory.build(Category::Study).unwrap();
        let second = factory.build(Category::Study).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.cached_len(), 1);
        assert_eq!(factory.loader().cached_len(), 1);
    }

    #[test]
    fn invalidate_rebuilds() {
        let factory = ValidatorFactory::default();
        let first = factory.build(Category::Person).unwrap();
        assert!(factory.invalidate(Category::Person));
        assert!(!factory.invalidate(Category::Person));
        let second = factory.build(Category::Person).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.fields().len(), second.fields().len());
    }

    #[test]
    fn delimiter_flows_into_validators() {
        let factory = ValidatorFactory::default().with_delimiter('|');
        assert_eq!(factory.build(Category::Event).unwrap().delimiter(), '|');
    }

    #[test]
    fn every_embedded_category_builds() {
        let factory = ValidatorFactory::default();
        for category in Category::ALL {
            let validator = factory.build(category).unwrap();
            assert_eq!(validator.category(), category);
            assert!(!validator.fields().is_empty());
        }
        factory.clear();
        assert_eq!(factory.cached_len(), 0);
    }
}
