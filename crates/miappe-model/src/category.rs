use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::schema::normalize_field_name;

/// Metadata category per the MIAPPE v1.1 checklist.
///
/// Each category is one sheet of a MIAPPE workbook and one schema table.
/// Variants are declared in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Investigation: a single transposed record (field name / value).
    Investigation,
    Study,
    Person,
    DataFile,
    BiologicalMaterial,
    Environment,
    ExperimentalFactor,
    Event,
    ObservationUnit,
    Sample,
    ObservedVariable,
}

impl Category {
    /// All categories in workbook order.
    pub const ALL: [Category; 11] = [
        Category::Investigation,
        Category::Study,
        Category::Person,
        Category::DataFile,
        Category::BiologicalMaterial,
        Category::Environment,
        Category::ExperimentalFactor,
        Category::Event,
        Category::ObservationUnit,
        Category::Sample,
        Category::ObservedVariable,
    ];

    /// Returns the sheet name as it appears in a MIAPPE workbook.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Category::Investigation => "Investigation",
            Category::Study => "Study",
            Category::Person => "Person",
            Category::DataFile => "Data file",
            Category::BiologicalMaterial => "Biological Material",
            Category::Environment => "Environment",
            Category::ExperimentalFactor => "Experimental Factor",
            Category::Event => "Event",
            Category::ObservationUnit => "Observation Unit",
            Category::Sample => "Sample",
            Category::ObservedVariable => "Observed Variable",
        }
    }

    /// Returns the snake_case key used for file names (e.g. `observation_unit`).
    pub fn key(&self) -> String {
        normalize_field_name(self.sheet_name())
    }

    /// Investigation sheets hold one transposed record instead of rows.
    pub fn is_transposed(&self) -> bool {
        matches!(self, Category::Investigation)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    /// Accepts the sheet name or its snake_case key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_field_name(s);
        Category::ALL
            .into_iter()
            .find(|category| category.key() == key)
            .ok_or_else(|| ModelError::UnknownCategory {
                name: s.trim().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sheet_names_and_keys() {
        assert_eq!(
            "Observation Unit".parse::<Category>().unwrap(),
            Category::ObservationUnit
        );
        assert_eq!(
            "observation_unit".parse::<Category>().unwrap(),
            Category::ObservationUnit
        );
        assert_eq!("data FILE".parse::<Category>().unwrap(), Category::DataFile);
        assert!("Trait".parse::<Category>().is_err());
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<String> = Category::ALL.iter().map(Category::key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Category::ALL.len());
    }

    #[test]
    fn only_investigation_is_transposed() {
        let transposed: Vec<_> = Category::ALL
            .into_iter()
            .filter(Category::is_transposed)
            .collect();
        assert_eq!(transposed, vec![Category::Investigation]);
    }
}
