//! ISO 3166-1 country table.

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::embedded;
use crate::error::{Result, StandardsError};

#[derive(Debug, Deserialize)]
struct CountryCsvRow {
    #[serde(rename = "Alpha-2 Code")]
    alpha_2: String,
    #[serde(rename = "Name")]
    name: String,
}

/// Alpha-2 codes and English short names, matched exactly.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    codes: HashSet<String>,
    names: HashSet<String>,
}

impl CountryTable {
    /// Parses a two-column `Alpha-2 Code,Name` CSV.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(content.as_bytes()));

        let mut table = Self::default();
        for result in reader.deserialize::<CountryCsvRow>() {
            let row = result.map_err(|e| StandardsError::CsvParse {
                file: "ISO 3166 countries.csv".to_string(),
                message: e.to_string(),
            })?;
            table.codes.insert(row.alpha_2.trim().to_string());
            table.names.insert(row.name.trim().to_string());
        }
        Ok(table)
    }

    /// True for an exact (case-sensitive) alpha-2 code or short name.
    pub fn contains(&self, value: &str) -> bool {
        self.codes.contains(value) || self.names.contains(value)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

static COUNTRIES: LazyLock<CountryTable> = LazyLock::new(|| {
    CountryTable::from_csv(embedded::ISO3166_COUNTRIES).unwrap_or_else(|error| {
        tracing::error!(%error, "embedded ISO 3166 table is unreadable");
        CountryTable::default()
    })
});

/// The embedded country table, parsed on first use.
pub fn countries() -> &'static CountryTable {
    &COUNTRIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let table = countries();
        assert_eq!(table.len(), 249);
        assert!(table.contains("Australia"));
        assert!(table.contains("AU"));
        assert!(table.contains("United Kingdom"));
        assert!(table.contains("Korea, Republic of"));
    }

    #[test]
    fn matching_is_exact() {
        let table = countries();
        assert!(!table.contains("UK"));
        assert!(!table.contains("au"));
        assert!(!table.contains("AUS"));
        assert!(!table.contains(" AU"));
    }

    #[test]
    fn rejects_malformed_csv() {
        let err = CountryTable::from_csv("Code\nAU\n").unwrap_err();
        assert!(matches!(err, StandardsError::CsvParse { .. }));
    }
}
