//! Workbook validation behind the `validate` command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use miappe_validate::{
    FailurePolicy, MetadataIo, MetadataIoOptions, ValidationReport, ValidatorFactory,
};
use tracing::info_span;

/// Settings of one `validate` run.
#[derive(Debug, Clone)]
pub struct ValidateSettings<'a> {
    pub schema_dir: Option<&'a Path>,
    pub value_index: usize,
    pub delimiter: char,
    pub failure_policy: FailurePolicy,
}

/// Reads a workbook and validates every category.
pub fn validate_workbook(path: &Path, settings: &ValidateSettings<'_>) -> Result<ValidationReport> {
    let span = info_span!("validate_workbook", path = %path.display());
    let _guard = span.enter();

    let factory =
        ValidatorFactory::from_schema_dir(settings.schema_dir).with_delimiter(settings.delimiter);
    let options = MetadataIoOptions::default()
        .with_value_index(settings.value_index)
        .with_validate(false)
        .with_failure_policy(settings.failure_policy)
        .with_factory(Arc::new(factory));

    let io = MetadataIo::open_with(path, options)
        .with_context(|| format!("read {}", path.display()))?;
    io.validate()
        .with_context(|| format!("validate {}", path.display()))
}

/// Process exit code for a finished run: 1 when any record was rejected.
pub fn exit_code(report: &ValidationReport) -> i32 {
    i32::from(!report.is_valid())
}
