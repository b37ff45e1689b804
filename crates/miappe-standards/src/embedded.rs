//! Embedded reference data.
//!
//! The MIAPPE v1.1 checklist is split into one schema table per category
//! (`<Sheet name>_model.tsv`) and compiled into the binary, together with
//! the ISO 3166-1 country table used by the country validator.

use miappe_model::Category;

/// Directory name of the embedded checklist version.
pub const MIAPPE_VERSION: &str = "v1.1";

const INVESTIGATION: &str = include_str!("../data/miappe/v1.1/Investigation_model.tsv");
const STUDY: &str = include_str!("../data/miappe/v1.1/Study_model.tsv");
const PERSON: &str = include_str!("../data/miappe/v1.1/Person_model.tsv");
const DATA_FILE: &str = include_str!("../data/miappe/v1.1/Data file_model.tsv");
const BIOLOGICAL_MATERIAL: &str =
    include_str!("../data/miappe/v1.1/Biological Material_model.tsv");
const ENVIRONMENT: &str = include_str!("../data/miappe/v1.1/Environment_model.tsv");
const EXPERIMENTAL_FACTOR: &str =
    include_str!("../data/miappe/v1.1/Experimental Factor_model.tsv");
const EVENT: &str = include_str!("../data/miappe/v1.1/Event_model.tsv");
const OBSERVATION_UNIT: &str = include_str!("../data/miappe/v1.1/Observation Unit_model.tsv");
const SAMPLE: &str = include_str!("../data/miappe/v1.1/Sample_model.tsv");
const OBSERVED_VARIABLE: &str =
    include_str!("../data/miappe/v1.1/Observed Variable_model.tsv");

/// ISO 3166-1 alpha-2 codes and English short names.
pub const ISO3166_COUNTRIES: &str = include_str!("../data/iso3166/countries.csv");

/// File name of a category's schema table, e.g. `Observation Unit_model.tsv`.
pub fn schema_file_name(category: Category) -> String {
    format!("{}_model.tsv", category.sheet_name())
}

/// Embedded schema table for a category.
pub fn schema_table(category: Category) -> &'static str {
    match category {
        Category::Investigation => INVESTIGATION,
        Category::Study => STUDY,
        Category::Person => PERSON,
        Category::DataFile => DATA_FILE,
        Category::BiologicalMaterial => BIOLOGICAL_MATERIAL,
        Category::Environment => ENVIRONMENT,
        Category::ExperimentalFactor => EXPERIMENTAL_FACTOR,
        Category::Event => EVENT,
        Category::ObservationUnit => OBSERVATION_UNIT,
        Category::Sample => SAMPLE,
        Category::ObservedVariable => OBSERVED_VARIABLE,
    }
}
