//! Reading and validating a whole MIAPPE workbook.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use miappe_ingest::{CategoryTable, DEFAULT_VALUE_INDEX, Workbook, read_tables};
use miappe_model::{Category, Issue};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::error::{Result, ValidateError};
use crate::factory::{ValidatorFactory, default_factory};
use crate::report::{RecordOutcome, ValidationReport};

/// What to do when a record is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log each rejection and keep going; every outcome is reported.
    #[default]
    Collect,
    /// Stop at the first rejected record with [`ValidateError::RecordRejected`].
    FailFast,
}

/// Options for [`MetadataIo`].
#[derive(Debug, Clone)]
pub struct MetadataIoOptions {
    /// Non-data rows between the header and the first record of row sheets.
    pub value_index: usize,
    /// Validate while constructing.
    pub validate: bool,
    pub failure_policy: FailurePolicy,
    /// Uses [`default_factory`] when `None`.
    pub factory: Option<Arc<ValidatorFactory>>,
}

impl Default for MetadataIoOptions {
    fn default() -> Self {
        Self {
            value_index: DEFAULT_VALUE_INDEX,
            validate: true,
            failure_policy: FailurePolicy::Collect,
            factory: None,
        }
    }
}

impl MetadataIoOptions {
    #[must_use]
    pub fn with_value_index(mut self, value_index: usize) -> Self {
        self.value_index = value_index;
        self
    }

    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: Arc<ValidatorFactory>) -> Self {
        self.factory = Some(factory);
        self
    }
}

/// A MIAPPE workbook read into per-category tables.
///
/// # Example
///
/// ```ignore
/// use miappe_validate::{MetadataIo, MetadataIoOptions, FailurePolicy};
///
/// let io = MetadataIo::open_with(
///     "metadata.xlsx",
///     MetadataIoOptions::default().with_validate(false),
/// )?;
/// let report = io.validate()?;
/// for rejected in report.rejected() {
///     println!("{}: {} issue(s)", rejected.location(), rejected.issues().len());
/// }
/// ```
#[derive(Debug)]
pub struct MetadataIo {
    path: Option<PathBuf>,
    tables: BTreeMap<Category, CategoryTable>,
    factory: Arc<ValidatorFactory>,
    failure_policy: FailurePolicy,
    report: Option<ValidationReport>,
}

impl MetadataIo {
    /// Opens and validates a workbook with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, MetadataIoOptions::default())
    }

    /// Opens a workbook file or delimited-sheet directory.
    ///
    /// Read failures propagate. When `options.validate` is set, the workbook
    /// is validated immediately and the report is kept (see [`report`](Self::report)).
    pub fn open_with(path: impl AsRef<Path>, options: MetadataIoOptions) -> Result<Self> {
        let path = path.as_ref();
        let span = info_span!("metadata_io", path = %path.display());
        let _guard = span.enter();

        let workbook = Workbook::open(path)?;
        let mut io = Self::from_workbook(&workbook, options)?;
        io.path = Some(path.to_path_buf());
        Ok(io)
    }

    /// Builds from an already loaded workbook.
    pub fn from_workbook(workbook: &Workbook, options: MetadataIoOptions) -> Result<Self> {
        let tables = read_tables(workbook, options.value_index)?;
        let mut io = Self {
            path: workbook.path().map(Path::to_path_buf),
            tables,
            factory: options.factory.unwrap_or_else(default_factory),
            failure_policy: options.failure_policy,
            report: None,
        };
        if options.validate {
            io.report = Some(io.validate()?);
        }
        Ok(io)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn factory(&self) -> &ValidatorFactory {
        &self.factory
    }

    pub fn tables(&self) -> &BTreeMap<Category, CategoryTable> {
        &self.tables
    }

    pub fn table(&self, category: Category) -> Option<&CategoryTable> {
        self.tables.get(&category)
    }

    /// Per-category frames of normalized string columns.
    pub fn frames(&self) -> BTreeMap<Category, &DataFrame> {
        self.tables
            .iter()
            .map(|(category, table)| (*category, table.frame()))
            .collect()
    }

    /// Report produced during construction, if validation was enabled.
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Validates every record of every category, in category order.
    pub fn validate(&self) -> Result<ValidationReport> {
        let start = Instant::now();
        let mut report = ValidationReport::new();
        for category in Category::ALL {
            report.extend(self.validate_category(category)?);
        }
        info!(
            records = report.len(),
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        Ok(report)
    }

    /// Validates every record of one category.
    ///
    /// A category without a table yields no outcomes.
    pub fn validate_category(&self, category: Category) -> Result<Vec<RecordOutcome>> {
        let span = info_span!("validate", %category);
        let _guard = span.enter();

        let Some(table) = self.tables.get(&category) else {
            debug!("no table for category");
            return Ok(Vec::new());
        };
        let validator = self.factory.build(category)?;
        let records = table.records()?;

        let mut outcomes = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let sheet_row = table.source_row(index);
            let outcome = validator.validate(record);
            if !outcome.is_accepted() {
                let issues = outcome.issues();
                warn!(
                    record = index,
                    sheet_row = ?sheet_row,
                    issues = %describe(issues),
                    "record rejected"
                );
                if self.failure_policy == FailurePolicy::FailFast {
                    return Err(ValidateError::RecordRejected {
                        category,
                        record: index,
                        sheet_row,
                        issues: issues.to_vec(),
                    });
                }
            }
            outcomes.push(RecordOutcome {
                category,
                record: index,
                sheet_row,
                outcome,
            });
        }

        let rejected = outcomes.iter().filter(|o| !o.is_accepted()).count();
        info!(
            records = outcomes.len(),
            rejected,
            "category validated"
        );
        Ok(outcomes)
    }
}

fn describe(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::message)
        .collect::<Vec<_>>()
        .join("; ")
}
