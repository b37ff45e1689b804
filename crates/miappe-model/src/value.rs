//! Record and value types flowing through validation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One spreadsheet row: normalized field name -> raw cell value (None when empty).
pub type ValidationRecord = BTreeMap<String, Option<String>>;

/// Accepted record: normalized field name -> typed value. Absent fields are omitted.
pub type ValidatedRecord = BTreeMap<String, FieldValue>;

/// A parsed ISO 8601 date or date-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temporal {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
    Date(NaiveDate),
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Zoned(value) => write!(f, "{}", value.to_rfc3339()),
            Temporal::Local(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
            Temporal::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

/// A validated field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, possibly delimiter-joined when the field is multi-valued.
    Text(String),
    /// One entry per delimiter-separated date item.
    Temporal(Vec<Temporal>),
    /// Output of the key-value list validator.
    Map(BTreeMap<String, String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Temporal(items) => {
                let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join("; "))
            }
            FieldValue::Map(map) => {
                let joined: Vec<String> = map.iter().map(|(k, v)| format!("{k}:{v}")).collect();
                f.write_str(&joined.join("; "))
            }
        }
    }
}
