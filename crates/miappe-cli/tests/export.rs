//! Integration tests for schema export.

use miappe_cli::export::{export_schemas, render_schema, schema_file_name};
use miappe_model::Category;
use miappe_validate::ValidatorFactory;
use tempfile::TempDir;

#[test]
fn test_schema_file_names() {
    assert_eq!(schema_file_name(Category::Study), "study_schema.json");
    assert_eq!(
        schema_file_name(Category::ObservationUnit),
        "observation_unit_schema.json"
    );
    assert_eq!(schema_file_name(Category::DataFile), "data_file_schema.json");
}

#[test]
fn test_export_all_categories() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("nested").join("schemas");
    let factory = ValidatorFactory::default();

    let written = export_schemas(&factory, &output, 2, &[]).unwrap();
    assert_eq!(written.len(), Category::ALL.len());
    for path in &written {
        assert!(path.is_file(), "{}", path.display());
    }

    let content = std::fs::read_to_string(output.join("study_schema.json")).unwrap();
    let schema: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(schema["title"], "Study");
    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["properties"]["study_unique_id"]["x-miappe-cardinality"],
        "1"
    );
    let required = schema["required"].as_array().unwrap();
    assert!(required.iter().any(|name| name == "study_unique_id"));
    assert!(!required.iter().any(|name| name == "study_description"));
}

#[test]
fn test_export_selected_categories_with_indent() {
    let dir = TempDir::new().unwrap();
    let factory = ValidatorFactory::default();

    let written = export_schemas(&factory, dir.path(), 4, &[Category::Person]).unwrap();
    assert_eq!(written, [dir.path().join("person_schema.json")]);

    let content = std::fs::read_to_string(&written[0]).unwrap();
    assert!(content.starts_with("{\n    \"$schema\""), "{content}");
    assert!(content.ends_with("}\n"));
}

#[test]
fn test_render_schema_matches_export() {
    let dir = TempDir::new().unwrap();
    let factory = ValidatorFactory::default();
    let validator = factory.build(Category::Event).unwrap();

    let written = export_schemas(&factory, dir.path(), 2, &[Category::Event]).unwrap();
    let on_disk = std::fs::read_to_string(&written[0]).unwrap();
    assert_eq!(on_disk, render_schema(&validator, 2).unwrap());
}
