use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use miappe_cli::export::export_schemas;
use miappe_cli::validate::{ValidateSettings, validate_workbook};
use miappe_model::Category;
use miappe_validate::{FailurePolicy, ValidationReport, ValidatorFactory};

use crate::cli::{ExportSchemaArgs, ValidateArgs};
use crate::summary::apply_table_style;

pub fn run_validate(args: &ValidateArgs, schema_dir: Option<&Path>) -> Result<ValidationReport> {
    let failure_policy = if args.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Collect
    };
    let settings = ValidateSettings {
        schema_dir,
        value_index: args.value_index,
        delimiter: args.delimiter,
        failure_policy,
    };
    validate_workbook(&args.path, &settings)
}

pub fn run_export_schema(args: &ExportSchemaArgs, schema_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let factory = ValidatorFactory::from_schema_dir(schema_dir);
    export_schemas(&factory, &args.output_dir, args.indent, &args.categories)
}

pub fn run_categories(schema_dir: Option<&Path>) -> Result<()> {
    let factory = ValidatorFactory::from_schema_dir(schema_dir);
    let mut table = Table::new();
    table.set_header(vec!["Category", "Key", "Fields", "Required"]);
    apply_table_style(&mut table);
    for category in Category::ALL {
        let validator = factory
            .build(category)
            .with_context(|| format!("build {category} validator"))?;
        table.add_row(vec![
            category.sheet_name().to_string(),
            category.key(),
            validator.fields().len().to_string(),
            validator.required_fields().count().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
