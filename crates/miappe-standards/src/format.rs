//! Format registry: checklist format labels to primitive types and validators.
//!
//! Ontology-term labels are accepted as plain text for now; no ontology
//! lookup is performed.

use std::collections::HashMap;
use std::sync::LazyLock;

use miappe_model::{FormatCheck, FormatRule, PrimitiveType};

use crate::error::{Result, StandardsError};

const fn text(label: &'static str) -> FormatRule {
    FormatRule {
        label,
        primitive: PrimitiveType::Text,
        check: None,
    }
}

const fn date_time(label: &'static str) -> FormatRule {
    FormatRule {
        label,
        primitive: PrimitiveType::DateTime,
        check: None,
    }
}

const fn checked(label: &'static str, check: FormatCheck) -> FormatRule {
    FormatRule {
        label,
        primitive: PrimitiveType::ValidatedText,
        check: Some(check),
    }
}

/// Every recognized format label.
pub static FORMAT_RULES: [FormatRule; 33] = [
    // Free text
    text("Free text (short)"),
    text("Free text"),
    text("Free text (see Appendix I)"),
    text("Free text (see Appendix II)"),
    text("Unique identifier"),
    text("Version number"),
    text("List"),
    text("Name"),
    text("Software version number"),
    text("Genus name"),
    text("Species name"),
    text("Free text, or key-value pair list, or MCPD-compliant format"),
    text("Plant Environment Ontology and/or free text"),
    // Ontology terms
    text("Crop Ontology term (subclass of \"CO_715:0000003\")"),
    text("Crop Ontology term (subclass of \"CO_715:0000005\")"),
    text("Crop Ontology term (subclass of CO_715:0000006)"),
    text("Plant Ontology term (subclass of PO:0009012) or BBCH scale term"),
    text("Plant Ontology term (subclass of PO:0025131)"),
    text("Crop Ontology term"),
    text("Term from Plant Trait Ontology, Crop Ontology, or XML Environment Ontology"),
    // Dates
    date_time("Date/Time (ISO 8601, optional time zone)"),
    date_time("Date/Time"),
    // Validated
    checked("DOI", FormatCheck::Doi),
    checked(
        "Country name or 2-letter code (ISO 3166)",
        FormatCheck::Country,
    ),
    checked(
        "Degrees in the decimal format (ISO 6709)",
        FormatCheck::LatLongDegree,
    ),
    checked("Numeric + unit abbreviation", FormatCheck::NumericUnit),
    checked("Numeric", FormatCheck::NumericUnit),
    checked(
        "URL or File name (of gis or tabular file like csv or tsv)",
        FormatCheck::UrlOrFilename,
    ),
    checked("URL or File name", FormatCheck::UrlOrFilename),
    checked("email address", FormatCheck::Email),
    checked("Formatted text (Key:value)", FormatCheck::KeyValueList),
    checked("URI or DOI", FormatCheck::UrlOrDoi),
    checked("Formatted text (level>level)", FormatCheck::Hierarchy),
];

static FORMAT_INDEX: LazyLock<HashMap<&'static str, &'static FormatRule>> =
    LazyLock::new(|| FORMAT_RULES.iter().map(|rule| (rule.label, rule)).collect());

/// Resolves a format label (surrounding whitespace ignored).
pub fn lookup(label: &str) -> Result<&'static FormatRule> {
    FORMAT_INDEX
        .get(label.trim())
        .copied()
        .ok_or_else(|| StandardsError::UnknownFormat {
            label: label.trim().to_string(),
        })
}
