//! Cardinality registry.

use miappe_model::CardinalityRule;

use crate::error::{Result, StandardsError};

const fn rule(
    label: &'static str,
    required: bool,
    min_count: usize,
    max_count: Option<usize>,
) -> CardinalityRule {
    CardinalityRule {
        label,
        required,
        min_count: Some(min_count),
        max_count,
    }
}

/// Every recognized cardinality label.
pub static CARDINALITY_RULES: [CardinalityRule; 6] = [
    rule("0-1", false, 0, Some(1)),
    rule("0+", false, 0, None),
    rule("1", true, 1, Some(1)),
    rule("1+", true, 1, None),
    rule("2", true, 2, Some(2)),
    rule("2+", true, 2, None),
];

/// Resolves a cardinality label by its first whitespace-delimited token,
/// so `"1+ (see note)"` resolves as `"1+"`.
pub fn lookup(label: &str) -> Result<&'static CardinalityRule> {
    let token = label.split_whitespace().next().unwrap_or_default();
    CARDINALITY_RULES
        .iter()
        .find(|rule| rule.label == token)
        .ok_or_else(|| StandardsError::UnknownCardinality {
            label: label.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        let expected = [
            ("0-1", false, Some(0), Some(1)),
            ("0+", false, Some(0), None),
            ("1", true, Some(1), Some(1)),
            ("1+", true, Some(1), None),
            ("2", true, Some(2), Some(2)),
            ("2+", true, Some(2), None),
        ];
        for (label, required, min, max) in expected {
            let rule = lookup(label).unwrap();
            assert_eq!(rule.label, label);
            assert_eq!(rule.required, required);
            assert_eq!(rule.min_count, min);
            assert_eq!(rule.max_count, max);
        }
    }

    #[test]
    fn annotation_after_space_is_ignored() {
        assert_eq!(lookup("1+ extra text").unwrap(), lookup("1+").unwrap());
        assert_eq!(lookup("0-1 (if applicable)").unwrap().label, "0-1");
    }

    #[test]
    fn unknown_label_is_an_error() {
        assert!(matches!(
            lookup("3"),
            Err(StandardsError::UnknownCardinality { .. })
        ));
        assert!(lookup("").is_err());
        assert!(lookup("1+(note)").is_err());
    }
}
