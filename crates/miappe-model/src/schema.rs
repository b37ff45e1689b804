//! Schema-level types: format and cardinality rules, field and category schemas.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ModelError;

/// Primitive value type selected by a format label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// Free text, accepted as-is.
    Text,
    /// ISO 8601 date or date-time.
    DateTime,
    /// Text that must pass a format validator.
    ValidatedText,
}

/// Field-level format validator attached to a format label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatCheck {
    Doi,
    Country,
    LatLongDegree,
    NumericUnit,
    Email,
    UrlOrFilename,
    UrlOrDoi,
    KeyValueList,
    Hierarchy,
}

impl FormatCheck {
    /// Structured checks see the whole value even on multi-valued fields.
    pub fn is_structured(&self) -> bool {
        matches!(self, FormatCheck::KeyValueList)
    }
}

/// One recognized format label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatRule {
    pub label: &'static str,
    pub primitive: PrimitiveType,
    pub check: Option<FormatCheck>,
}

/// One recognized cardinality label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardinalityRule {
    pub label: &'static str,
    pub required: bool,
    pub min_count: Option<usize>,
    /// `None` means unbounded.
    pub max_count: Option<usize>,
}

impl CardinalityRule {
    /// True when the rule permits more than one occurrence.
    pub fn allows_many(&self) -> bool {
        self.max_count.is_none_or(|max| max > 1)
    }
}

/// One row of a category schema table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Raw checklist title, e.g. "Study unique ID".
    pub title: String,
    /// Programmatic key derived from the title, e.g. "study_unique_id".
    pub name: String,
    pub definition: String,
    pub example: String,
    pub format_label: String,
    pub cardinality_label: String,
}

impl FieldSchema {
    pub fn new(
        title: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
        format_label: impl Into<String>,
        cardinality_label: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            name: normalize_field_name(&title),
            title,
            definition: definition.into(),
            example: example.into(),
            format_label: format_label.into(),
            cardinality_label: cardinality_label.into(),
        }
    }
}

/// Ordered field schemas for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySchema {
    pub category: Category,
    fields: Vec<FieldSchema>,
}

impl CategorySchema {
    /// Builds a schema, rejecting duplicate normalized names.
    pub fn new(category: Category, fields: Vec<FieldSchema>) -> Result<Self, ModelError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    category,
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { category, fields })
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Normalizes a checklist title or sheet header into a field key.
///
/// Trims, drops `*` markers and line breaks, lowercases, and replaces
/// spaces with underscores: `"Study unique ID*"` becomes `"study_unique_id"`.
pub fn normalize_field_name(raw: &str) -> String {
    raw.replace(['*', '\r', '\n'], "")
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_titles() {
        assert_eq!(normalize_field_name("Study unique ID"), "study_unique_id");
        assert_eq!(normalize_field_name("  Study unique ID* "), "study_unique_id");
        assert_eq!(normalize_field_name("Person\nemail"), "personemail");
        assert_eq!(
            normalize_field_name("Geographic location (country)"),
            "geographic_location_(country)"
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let fields = vec![
            FieldSchema::new("Event type", "", "", "Free text", "1"),
            FieldSchema::new("Event date", "", "", "Date/Time", "1+"),
            FieldSchema::new("event type", "", "", "Free text", "0-1"),
        ];
        let err = CategorySchema::new(Category::Event, fields).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateField { ref name, .. } if name == "event_type"));
    }

    #[test]
    fn allows_many_follows_max_count() {
        let single = CardinalityRule {
            label: "0-1",
            required: false,
            min_count: Some(0),
            max_count: Some(1),
        };
        let unbounded = CardinalityRule {
            label: "1+",
            required: true,
            min_count: Some(1),
            max_count: None,
        };
        assert!(!single.allows_many());
        assert!(unbounded.allows_many());
    }
}
