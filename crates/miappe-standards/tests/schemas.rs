use std::fs;
use std::sync::Arc;

use miappe_model::Category;
use miappe_standards::{
    DirectorySource, SchemaLoader, StandardsError, cardinality, embedded, format,
};

#[test]
fn embedded_schemas_reference_known_labels() {
    let loader = SchemaLoader::default();
    for category in Category::ALL {
        let schema = loader.load(category).expect("embedded schema parses");
        assert!(!schema.is_empty(), "{category} has no fields");
        for field in schema.fields() {
            format::lookup(&field.format_label)
                .unwrap_or_else(|e| panic!("{category}/{}: {e}", field.title));
            cardinality::lookup(&field.cardinality_label)
                .unwrap_or_else(|e| panic!("{category}/{}: {e}", field.title));
        }
    }
}

#[test]
fn study_schema_shape() {
    let schema = SchemaLoader::default().load(Category::Study).unwrap();
    let id = schema.field("study_unique_id").expect("study id field");
    assert_eq!(id.format_label, "Unique identifier");
    assert!(cardinality::lookup(&id.cardinality_label).unwrap().required);

    let country = schema.field("geographic_location_(country)").unwrap();
    assert_eq!(country.format_label, "Country name or 2-letter code (ISO 3166)");

    let design = schema.field("type_of_experimental_design").unwrap();
    assert_eq!(
        design.format_label,
        "Crop Ontology term (subclass of \"CO_715:0000003\")"
    );
}

#[test]
fn directory_source_overrides_embedded_tables() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(embedded::schema_file_name(Category::Study)),
        "MIAPPE Check list\tDefinition\tExample\tFormat\tCardinality\n\
         Study unique ID\tIdentifier\tSTU-1\tUnique identifier\t1\n",
    )
    .unwrap();

    let loader = SchemaLoader::new(Arc::new(DirectorySource::new(dir.path())));
    let schema = loader.load(Category::Study).unwrap();
    assert_eq!(schema.len(), 1);

    let err = loader.load(Category::Person).unwrap_err();
    assert!(matches!(err, StandardsError::SchemaNotFound { category: Category::Person, .. }));
}

#[test]
fn cached_schema_is_shared() {
    let loader = SchemaLoader::default();
    let first = loader.load(Category::Event).unwrap();
    let second = loader.load(Category::Event).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    loader.invalidate(Category::Event);
    let third = loader.load(Category::Event).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}
