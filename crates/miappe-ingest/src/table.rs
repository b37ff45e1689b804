//! Sheet normalization into per-category tables.
//!
//! Two layouts exist. The Investigation sheet is transposed: column A holds
//! field titles and a `Value` column holds the values, giving exactly one
//! record. Every other sheet has a header row of field titles followed by
//! `value_index` non-data rows (definition, example, ...) and then records.

use std::collections::{BTreeMap, HashSet};

use miappe_model::{Category, ValidationRecord, normalize_field_name};
use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::workbook::{RawSheet, Workbook};

/// Default number of non-data rows between the header and the first record.
pub const DEFAULT_VALUE_INDEX: usize = 3;

/// Header of the Investigation value column.
const VALUE_COLUMN: &str = "Value";

/// Normalized name of the row-label column dropped from row-oriented sheets.
const FIELD_COLUMN: &str = "field";

/// Records of one category as string columns keyed by normalized field name.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    pub category: Category,
    frame: DataFrame,
    /// One-based sheet row of each record; `None` for the transposed sheet.
    source_rows: Vec<Option<usize>>,
}

impl CategoryTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.source_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_rows.is_empty()
    }

    pub fn source_row(&self, index: usize) -> Option<usize> {
        self.source_rows.get(index).copied().flatten()
    }

    /// Normalized column names in sheet order.
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Materializes every record; empty cells are `None`.
    pub fn records(&self) -> Result<Vec<ValidationRecord>> {
        let mut records = vec![ValidationRecord::new(); self.len()];
        for column in self.frame.get_columns() {
            let name = column.name().to_string();
            let values = column.str()?;
            for (record, value) in records.iter_mut().zip(values.into_iter()) {
                record.insert(name.clone(), value.map(str::to_string));
            }
        }
        Ok(records)
    }
}

/// Reads every category sheet of a workbook.
///
/// A missing category sheet is an error.
pub fn read_tables(
    workbook: &Workbook,
    value_index: usize,
) -> Result<BTreeMap<Category, CategoryTable>> {
    let mut tables = BTreeMap::new();
    for category in Category::ALL {
        let sheet = workbook
            .sheet(category.sheet_name())
            .ok_or_else(|| IngestError::MissingSheet {
                sheet: category.sheet_name().to_string(),
            })?;
        let table = read_category_table(sheet, category, value_index)?;
        tracing::debug!(
            %category,
            records = table.len(),
            columns = table.frame.width(),
            "read sheet"
        );
        tables.insert(category, table);
    }
    Ok(tables)
}

/// Normalizes one sheet using the layout of its category.
pub fn read_category_table(
    sheet: &RawSheet,
    category: Category,
    value_index: usize,
) -> Result<CategoryTable> {
    if category.is_transposed() {
        read_transposed(sheet, category)
    } else {
        read_rows(sheet, category, value_index)
    }
}

fn read_transposed(sheet: &RawSheet, category: Category) -> Result<CategoryTable> {
    let Some((header, body)) = sheet.rows.split_first() else {
        return build_table(category, Vec::new(), vec![Vec::new()], vec![None]);
    };
    let value_idx = header
        .iter()
        .position(|cell| cell.trim() == VALUE_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn {
            column: VALUE_COLUMN.to_string(),
            sheet: sheet.name.clone(),
        })?;

    let mut names = Vec::new();
    let mut values = Vec::new();
    let mut seen = HashSet::new();
    for row in body {
        let name = normalize_field_name(row.first().map_or("", String::as_str));
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                column: name,
                sheet: sheet.name.clone(),
            });
        }
        names.push(name);
        values.push(clean_cell(row.get(value_idx)));
    }

    build_table(category, names, vec![values], vec![None])
}

fn read_rows(sheet: &RawSheet, category: Category, value_index: usize) -> Result<CategoryTable> {
    let Some((header, _)) = sheet.rows.split_first() else {
        return build_table(category, Vec::new(), Vec::new(), Vec::new());
    };

    // (sheet column index, normalized name), without the row-label column
    let mut columns = Vec::new();
    let mut seen = HashSet::new();
    for (idx, cell) in header.iter().enumerate() {
        let name = normalize_field_name(cell);
        if name.is_empty() || name == FIELD_COLUMN {
            continue;
        }
        if !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumn {
                column: name,
                sheet: sheet.name.clone(),
            });
        }
        columns.push((idx, name));
    }

    let mut rows = Vec::new();
    let mut source_rows = Vec::new();
    for (offset, row) in sheet.rows.iter().enumerate().skip(1 + value_index) {
        let values: Vec<Option<String>> = columns
            .iter()
            .map(|(idx, _)| clean_cell(row.get(*idx)))
            .collect();
        if values.iter().all(Option::is_none) {
            continue;
        }
        rows.push(values);
        source_rows.push(Some(sheet.sheet_row(offset)));
    }

    let names = columns.into_iter().map(|(_, name)| name).collect();
    build_table(category, names, rows, source_rows)
}

/// Trims a cell; blank cells become `None`.
fn clean_cell(cell: Option<&String>) -> Option<String> {
    cell.map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn build_table(
    category: Category,
    names: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    source_rows: Vec<Option<usize>>,
) -> Result<CategoryTable> {
    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<Option<String>> =
                rows.iter().map(|row| row.get(idx).cloned().flatten()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    let frame = DataFrame::new(columns)?;
    Ok(CategoryTable {
        category,
        frame,
        source_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study_sheet() -> RawSheet {
        RawSheet::from_rows(
            "Study",
            vec![
                vec!["Field", "Study unique ID*", "Study title", "Start date of study"],
                vec!["Definition", "Unique id", "Title", "Start"],
                vec!["Example", "INRA:1", "A title", "2002-04-04"],
                vec!["Format", "Unique identifier", "Free text", "Date/Time"],
                vec!["", " STU-1 ", "Drought 2019", ""],
                vec!["", "", "", ""],
                vec!["", "STU-2", "", "2020-05-01"],
            ],
        )
    }

    #[test]
    fn test_row_sheet_layout() {
        let table = read_category_table(&study_sheet(), Category::Study, 3).unwrap();
        assert_eq!(
            table.columns(),
            ["study_unique_id", "study_title", "start_date_of_study"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.source_row(0), Some(5));
        assert_eq!(table.source_row(1), Some(7));

        let records = table.records().unwrap();
        assert_eq!(records[0]["study_unique_id"].as_deref(), Some("STU-1"));
        assert_eq!(records[0]["start_date_of_study"], None);
        assert_eq!(records[1]["study_title"], None);
    }

    #[test]
    fn test_value_index_zero_keeps_all_rows() {
        let table = read_category_table(&study_sheet(), Category::Study, 0).unwrap();
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_transposed_layout() {
        let sheet = RawSheet::from_rows(
            "Investigation",
            vec![
                vec!["Field", "Definition", "Value"],
                vec!["Investigation unique ID", "id", "INV-1"],
                vec!["Investigation title", "title", "  Drought  "],
                vec!["", "", "ignored"],
                vec!["Associated publication", "doi", ""],
            ],
        );
        let table = read_category_table(&sheet, Category::Investigation, 3).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.source_row(0), None);

        let records = table.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["investigation_title"].as_deref(), Some("Drought"));
        assert_eq!(records[0]["associated_publication"], None);
        assert_eq!(records[0].len(), 3);
    }

    #[test]
    fn test_transposed_without_value_column() {
        let sheet = RawSheet::from_rows("Investigation", vec![vec!["Field", "Definition"]]);
        let err = read_category_table(&sheet, Category::Investigation, 3).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "Value"));
    }

    #[test]
    fn test_empty_investigation_is_one_blank_record() {
        let sheet = RawSheet::from_rows("Investigation", Vec::<Vec<&str>>::new());
        let table = read_category_table(&sheet, Category::Investigation, 3).unwrap();
        assert_eq!(table.records().unwrap(), vec![ValidationRecord::new()]);
    }

    #[test]
    fn test_duplicate_headers() {
        let sheet = RawSheet::from_rows("Person", vec![vec!["Person name", "person name*"]]);
        let err = read_category_table(&sheet, Category::Person, 3).unwrap_err();
        assert!(matches!(err, IngestError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_missing_sheet() {
        let workbook = Workbook::from_sheets(vec![study_sheet()]);
        let err = read_tables(&workbook, 3).unwrap_err();
        assert!(matches!(err, IngestError::MissingSheet { ref sheet } if sheet == "Investigation"));
    }
}
