//! Field-level validation issues and per-record outcomes.

use serde::Serialize;

use crate::value::ValidatedRecord;

/// A single field failure within one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A required field is absent or blank.
    RequiredMissing { field: String },
    /// A value (or one delimiter item of it) failed its format validator.
    InvalidFormat {
        field: String,
        value: String,
        reason: String,
    },
    /// The number of delimiter-separated occurrences is out of range.
    Cardinality {
        field: String,
        value: Option<String>,
        count: usize,
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl Issue {
    /// Normalized field name the issue refers to.
    pub fn field(&self) -> &str {
        match self {
            Issue::RequiredMissing { field }
            | Issue::InvalidFormat { field, .. }
            | Issue::Cardinality { field, .. } => field,
        }
    }

    /// Short rule identifier used in summaries.
    pub fn rule(&self) -> &'static str {
        match self {
            Issue::RequiredMissing { .. } => "required",
            Issue::InvalidFormat { .. } => "format",
            Issue::Cardinality { .. } => "cardinality",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::RequiredMissing { field } => format!("Required field {field} is missing"),
            Issue::InvalidFormat {
                field,
                value,
                reason,
            } => format!("Field {field}: {reason} ({value:?})"),
            Issue::Cardinality {
                field,
                count,
                min,
                max,
                ..
            } => {
                let bound = match (min, max) {
                    (Some(min), Some(max)) if min == max => format!("exactly {min}"),
                    (Some(min), Some(max)) => format!("between {min} and {max}"),
                    (Some(min), None) => format!("at least {min}"),
                    (None, Some(max)) => format!("at most {max}"),
                    (None, None) => "any number of".to_string(),
                };
                format!("Field {field} has {count} values, expected {bound}")
            }
        }
    }
}

/// Result of validating one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted(ValidatedRecord),
    Rejected(Vec<Issue>),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn record(&self) -> Option<&ValidatedRecord> {
        match self {
            ValidationOutcome::Accepted(record) => Some(record),
            ValidationOutcome::Rejected(_) => None,
        }
    }

    /// Issues of a rejected record; empty when accepted.
    pub fn issues(&self) -> &[Issue] {
        match self {
            ValidationOutcome::Accepted(_) => &[],
            ValidationOutcome::Rejected(issues) => issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_message_names_bounds() {
        let issue = Issue::Cardinality {
            field: "study_unique_id".to_string(),
            value: Some("a;b".to_string()),
            count: 2,
            min: Some(1),
            max: Some(1),
        };
        assert_eq!(issue.field(), "study_unique_id");
        assert_eq!(issue.rule(), "cardinality");
        assert_eq!(
            issue.message(),
            "Field study_unique_id has 2 values, expected exactly 1"
        );
    }

    #[test]
    fn rejected_outcome_exposes_issues() {
        let outcome = ValidationOutcome::Rejected(vec![Issue::RequiredMissing {
            field: "person_name".to_string(),
        }]);
        assert!(!outcome.is_accepted());
        assert!(outcome.record().is_none());
        assert_eq!(outcome.issues().len(), 1);
    }
}
