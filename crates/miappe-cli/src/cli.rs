//! CLI argument definitions for the MIAPPE validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use miappe_ingest::DEFAULT_VALUE_INDEX;
use miappe_model::Category;
use miappe_standards::SCHEMA_DIR_ENV;
use miappe_validate::DEFAULT_DELIMITER;

#[derive(Parser)]
#[command(
    name = "miappe",
    version,
    about = "MIAPPE metadata validator - check plant phenotyping workbooks against MIAPPE v1.1",
    long_about = "Validate MIAPPE metadata workbooks against the MIAPPE v1.1 checklist.\n\n\
                  Reads xlsx/xls/ods workbooks or directories of per-sheet TSV/CSV files,\n\
                  checks every record of every category, and exports JSON Schemas."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory of `<Sheet name>_model.tsv` schema tables (default: embedded v1.1).
    #[arg(long = "schema-dir", value_name = "DIR", env = SCHEMA_DIR_ENV, global = true)]
    pub schema_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every record of a metadata workbook.
    Validate(ValidateArgs),

    /// Write one JSON Schema file per category.
    ExportSchema(ExportSchemaArgs),

    /// List the MIAPPE categories and their schema sizes.
    Categories,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Workbook file (xlsx, xls, ods, ...) or directory of per-sheet TSV/CSV files.
    #[arg(value_name = "WORKBOOK")]
    pub path: PathBuf,

    /// Non-data rows between the header and the first record of row sheets.
    #[arg(long = "value-index", default_value_t = DEFAULT_VALUE_INDEX)]
    pub value_index: usize,

    /// Separator of multi-valued fields.
    #[arg(long = "delimiter", default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Stop at the first rejected record.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct ExportSchemaArgs {
    /// Output directory (created if missing).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "schemas")]
    pub output_dir: PathBuf,

    /// Spaces per indentation level.
    #[arg(long = "indent", default_value_t = 2)]
    pub indent: usize,

    /// Categories to export (default: all). Sheet names or snake_case keys.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<Category>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
