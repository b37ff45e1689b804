//! Workbook sources: spreadsheets, directories of delimited sheets, or memory.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveTime;

use crate::error::{IngestError, Result};

/// Spreadsheet extensions handled by calamine.
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// One sheet as a grid of cell strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    pub name: String,
    /// Zero-based sheet row of `rows[0]`.
    pub first_row: usize,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            first_row: 0,
            rows,
        }
    }

    /// Builds a sheet from string literals, mainly for tests and callers
    /// that already hold the cells in memory.
    pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, rows)
    }

    /// One-based sheet row number of `rows[index]`.
    pub fn sheet_row(&self, index: usize) -> usize {
        self.first_row + index + 1
    }
}

/// A set of named sheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    path: Option<PathBuf>,
    sheets: Vec<RawSheet>,
}

impl Workbook {
    /// In-memory workbook.
    pub fn from_sheets(sheets: Vec<RawSheet>) -> Self {
        Self { path: None, sheets }
    }

    /// Opens a spreadsheet file (xlsx, xls, ods, ...) or a directory holding
    /// one `<Sheet name>.tsv` / `.csv` file per sheet.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let sheets = if path.is_dir() {
            read_delimited_dir(path)?
        } else if has_extension(path, &SPREADSHEET_EXTENSIONS) {
            read_spreadsheet(path)?
        } else {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        };
        tracing::debug!(
            path = %path.display(),
            sheets = sheets.len(),
            "opened workbook"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            sheets,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    /// Finds a sheet by exact (trimmed) name.
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|sheet| sheet.name.trim() == name)
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn read_spreadsheet(path: &Path) -> Result<Vec<RawSheet>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| workbook_error(format!("sheet '{name}': {e}")))?;
        let first_row = range.start().map_or(0, |(row, _)| row as usize);
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        sheets.push(RawSheet {
            name,
            first_row,
            rows,
        });
    }
    Ok(sheets)
}

/// Renders a spreadsheet cell as text.
///
/// Integral floats drop the fractional part; date cells become ISO 8601.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_float(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => cell.to_string(),
        },
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn read_delimited_dir(dir: &Path) -> Result<Vec<RawSheet>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, &["tsv", "csv"]) {
            files.push(path);
        }
    }
    files.sort();

    files.iter().map(|path| read_delimited_sheet(path)).collect()
}

/// Reads one delimited file; the sheet is named after the file stem.
fn read_delimited_sheet(path: &Path) -> Result<RawSheet> {
    let mut content = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut content))
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let delimiter = if has_extension(path, &["tsv"]) {
        b'\t'
    } else {
        b','
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();
    Ok(RawSheet::new(name, rows))
}
