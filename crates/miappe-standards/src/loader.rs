//! Schema loading with a per-category cache.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, PoisonError, RwLock};

use miappe_model::{Category, CategorySchema, FieldSchema, ModelError};
use serde::Deserialize;

use crate::error::{Result, StandardsError};
use crate::source::{EmbeddedSource, SchemaSource};

/// Column headers every schema table must carry, in order.
pub const SCHEMA_COLUMNS: [&str; 5] = [
    "MIAPPE Check list",
    "Definition",
    "Example",
    "Format",
    "Cardinality",
];

/// Row of a `<Sheet name>_model.tsv` table.
#[derive(Debug, Deserialize)]
struct SchemaTsvRow {
    #[serde(rename = "MIAPPE Check list")]
    title: String,
    #[serde(rename = "Definition")]
    definition: String,
    #[serde(rename = "Example")]
    example: String,
    #[serde(rename = "Format")]
    format: String,
    #[serde(rename = "Cardinality")]
    cardinality: String,
}

/// Parses one category's schema table.
///
/// Every data row becomes a [`FieldSchema`]; none are skipped.
pub fn parse_schema_table(category: Category, content: &str) -> Result<CategorySchema> {
    let parse_error = |message: String| StandardsError::SchemaParse { category, message };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let headers = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .clone();
    let header_names: Vec<&str> = headers.iter().map(str::trim).collect();
    if header_names != SCHEMA_COLUMNS {
        return Err(parse_error(format!(
            "expected columns [{}], found [{}]",
            SCHEMA_COLUMNS.join(", "),
            header_names.join(", ")
        )));
    }

    let mut fields = Vec::new();
    for (index, result) in reader.deserialize::<SchemaTsvRow>().enumerate() {
        let row = result.map_err(|e| parse_error(e.to_string()))?;
        if row.title.trim().is_empty() {
            return Err(parse_error(format!("row {} has an empty title", index + 1)));
        }
        fields.push(FieldSchema::new(
            row.title.trim(),
            row.definition.trim(),
            row.example.trim(),
            row.format.trim(),
            row.cardinality.trim(),
        ));
    }

    CategorySchema::new(category, fields).map_err(|err| match err {
        ModelError::DuplicateField { category, name } => {
            StandardsError::DuplicateField { category, name }
        }
        other => parse_error(other.to_string()),
    })
}

/// Loads category schemas from a [`SchemaSource`], caching each one.
///
/// Cached schemas live until [`invalidate`](Self::invalidate) or
/// [`clear`](Self::clear) is called.
#[derive(Debug)]
pub struct SchemaLoader {
    source: Arc<dyn SchemaSource>,
    cache: RwLock<HashMap<Category, Arc<CategorySchema>>>,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new(Arc::new(EmbeddedSource))
    }
}

impl SchemaLoader {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &dyn SchemaSource {
        self.source.as_ref()
    }

    /// Returns the schema for a category, reading the source only on a cache miss.
    pub fn load(&self, category: Category) -> Result<Arc<CategorySchema>> {
        if let Some(schema) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
        {
            return Ok(Arc::clone(schema));
        }

        let content = self.source.read_table(category)?;
        let schema = Arc::new(parse_schema_table(category, &content)?);
        tracing::debug!(
            %category,
            fields = schema.len(),
            source = %self.source.location(),
            "loaded schema"
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(category).or_insert(schema)))
    }

    /// Drops one cached schema. Returns true if it was cached.
    pub fn invalidate(&self, category: Category) -> bool {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&category)
            .is_some()
    }

    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached schemas.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "MIAPPE Check list\tDefinition\tExample\tFormat\tCardinality\n";

    #[test]
    fn parses_rows_in_order() {
        let content = format!(
            "{HEADER}Study unique ID*\tUnique id\tSTU-1\tUnique identifier\t1\n\
             Associated publication\tA DOI\t10.5555/67890\tDOI\t0+\n"
        );
        let schema = parse_schema_table(Category::Study, &content).unwrap();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["study_unique_id", "associated_publication"]);
        assert_eq!(schema.fields()[0].title, "Study unique ID*");
        assert_eq!(schema.fields()[1].format_label, "DOI");
    }

    #[test]
    fn rejects_wrong_columns() {
        let content = "Title\tFormat\tCardinality\nStudy title\tFree text\t1\n";
        let err = parse_schema_table(Category::Study, content).unwrap_err();
        assert!(matches!(err, StandardsError::SchemaParse { .. }));
    }

    #[test]
    fn rejects_short_rows() {
        let content = format!("{HEADER}Study title\tFree text\n");
        assert!(parse_schema_table(Category::Study, &content).is_err());
    }

    #[test]
    fn rejects_duplicate_titles() {
        let content = format!(
            "{HEADER}Study title\t\t\tFree text\t1\nStudy Title\t\t\tFree text\t1\n"
        );
        let err = parse_schema_table(Category::Study, &content).unwrap_err();
        assert!(matches!(err, StandardsError::DuplicateField { ref name, .. } if name == "study_title"));
    }

    #[test]
    fn invalidate_and_clear() {
        let loader = SchemaLoader::default();
        loader.load(Category::Study).unwrap();
        loader.load(Category::Person).unwrap();
        assert_eq!(loader.cached_len(), 2);
        assert!(loader.invalidate(Category::Study));
        assert!(!loader.invalidate(Category::Study));
        loader.clear();
        assert_eq!(loader.cached_len(), 0);
    }
}
