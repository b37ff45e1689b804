//! JSON Schema export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miappe_model::Category;
use miappe_validate::{SheetValidator, ValidatorFactory};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

/// File name of a category's schema, e.g. `observation_unit_schema.json`.
pub fn schema_file_name(category: Category) -> String {
    format!("{}_schema.json", category.key())
}

/// Renders a validator's JSON Schema with `indent` spaces per level.
pub fn render_schema(validator: &SheetValidator, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    validator
        .json_schema()
        .serialize(&mut serializer)
        .context("serialize JSON schema")?;
    buf.push(b'\n');
    String::from_utf8(buf).context("JSON schema is not UTF-8")
}

/// Writes one schema file per category into `output_dir`, creating it if needed.
///
/// An empty `categories` slice exports every category.
pub fn export_schemas(
    factory: &ValidatorFactory,
    output_dir: &Path,
    indent: usize,
    categories: &[Category],
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let selected: Vec<Category> = if categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        categories.to_vec()
    };

    let mut written = Vec::with_capacity(selected.len());
    for category in selected {
        let validator = factory
            .build(category)
            .with_context(|| format!("build {category} validator"))?;
        let path = output_dir.join(schema_file_name(category));
        let content = render_schema(&validator, indent)?;
        std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
        info!(%category, path = %path.display(), "exported schema");
        written.push(path);
    }
    Ok(written)
}
