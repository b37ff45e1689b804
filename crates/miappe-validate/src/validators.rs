//! Field validators.
//!
//! Each validator checks one primitive shape and returns the input unchanged
//! on success. Absence is never a format failure; it is handled by the
//! cardinality check.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use miappe_model::{FieldValue, FormatCheck, Temporal};
use miappe_standards::CountryTable;
use regex::Regex;

/// Default separator of multi-valued fields.
pub const DEFAULT_DELIMITER: char = ';';

static DOI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^10\.\d{4,9}/[-._;()/:a-zA-Z0-9]+$").expect("Invalid DOI regex")
});

/// Decimal degrees, integer part up to 180, up to 7 fractional digits.
static LAT_LONG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?([0-9]{1,2}|1[0-7][0-9]|180)(\.[0-9]{1,7})?$")
        .expect("Invalid lat/long regex")
});

/// Number with an optional metre suffix.
static NUMERIC_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?\d*\.?\d+\s?m?$").expect("Invalid numeric regex")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("Invalid URL regex")
});

static FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.\- ]+$").expect("Invalid filename regex"));

/// Device names that cannot be used as file names.
const RESERVED_FILENAMES: [&str; 22] = [
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// A value that failed a format validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}: {value}")]
pub struct FieldValidationError {
    pub value: String,
    pub reason: String,
}

impl FieldValidationError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type FieldResult<T> = Result<T, FieldValidationError>;

fn validate_regex<'a>(regex: &Regex, value: &'a str, reason: &str) -> FieldResult<&'a str> {
    if regex.is_match(value) {
        Ok(value)
    } else {
        Err(FieldValidationError::new(value, reason))
    }
}

pub fn validate_doi(value: &str) -> FieldResult<&str> {
    validate_regex(&DOI_REGEX, value, "Invalid DOI format")
}

/// Exact ISO 3166-1 short name or alpha-2 code.
pub fn validate_country<'a>(value: &'a str, countries: &CountryTable) -> FieldResult<&'a str> {
    if countries.contains(value) {
        Ok(value)
    } else {
        Err(FieldValidationError::new(
            value,
            "Invalid country name (ISO 3166-1 name) or 2 letter country code (ISO 3166-1 alpha 2)",
        ))
    }
}

pub fn validate_lat_long(value: &str) -> FieldResult<&str> {
    validate_regex(&LAT_LONG_REGEX, value, "Invalid Lat/Long Degree (ISO 6709)")
}

pub fn validate_numeric(value: &str) -> FieldResult<&str> {
    validate_regex(
        &NUMERIC_UNIT_REGEX,
        value,
        "Invalid input, must be numeric with optional unit (m)",
    )
}

pub fn validate_email(value: &str) -> FieldResult<&str> {
    validate_regex(&EMAIL_REGEX, value, "Invalid email address")
}

pub fn validate_url(value: &str) -> FieldResult<&str> {
    validate_regex(&URL_REGEX, value, "Invalid URL")
}

pub fn validate_filename(value: &str) -> FieldResult<&str> {
    let value_lower = value.to_lowercase();
    if RESERVED_FILENAMES.contains(&value_lower.as_str()) {
        return Err(FieldValidationError::new(value, "Reserved filename"));
    }
    validate_regex(&FILENAME_REGEX, value, "Invalid filename")
}

/// Tries each validator in order; if all fail, reports `reason`.
fn first_of<'a>(
    value: &'a str,
    validators: &[fn(&str) -> FieldResult<&str>],
    reason: &str,
) -> FieldResult<&'a str> {
    if validators.iter().any(|validate| validate(value).is_ok()) {
        Ok(value)
    } else {
        Err(FieldValidationError::new(value, reason))
    }
}

pub fn validate_url_or_filename(value: &str) -> FieldResult<&str> {
    first_of(
        value,
        &[validate_url, validate_filename],
        "Invalid URL or Filename",
    )
}

pub fn validate_url_or_doi(value: &str) -> FieldResult<&str> {
    first_of(value, &[validate_url, validate_doi], "Invalid URL or DOI")
}

/// Parses `key:value` pairs separated by `;`.
///
/// Each pair splits on its first `:`; both sides are trimmed and must be
/// non-empty, so a blank segment (such as a trailing `;`) is rejected. A
/// repeated key keeps its last value.
pub fn validate_key_value_list(value: &str) -> FieldResult<BTreeMap<String, String>> {
    let invalid = || FieldValidationError::new(value, "Invalid key value list");
    let mut pairs = BTreeMap::new();
    for segment in value.split(';') {
        let (key, val) = segment.split_once(':').ok_or_else(invalid)?;
        let (key, val) = (key.trim(), val.trim());
        if key.is_empty() || val.is_empty() {
            return Err(invalid());
        }
        pairs.insert(key.to_string(), val.to_string());
    }
    Ok(pairs)
}

/// Level path such as `block>rep>plot`.
pub fn validate_hierarchy(value: &str) -> FieldResult<&str> {
    if value.contains('>') {
        Ok(value)
    } else {
        Err(FieldValidationError::new(value, "Invalid Hierarchy format"))
    }
}

/// Parses an ISO 8601 date, local date-time, or offset date-time.
pub fn parse_temporal(value: &str) -> FieldResult<Temporal> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Ok(Temporal::Zoned(zoned));
    }
    if let Ok(zoned) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z") {
        return Ok(Temporal::Zoned(zoned));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Temporal::Local(local));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Temporal::Date)
        .map_err(|_| FieldValidationError::new(value, "Invalid ISO 8601 date/time"))
}

/// Runs the validator selected by a format check on a present value.
pub fn apply_check(
    check: FormatCheck,
    value: &str,
    countries: &CountryTable,
) -> FieldResult<FieldValue> {
    let text = |result: FieldResult<&str>| result.map(|v| FieldValue::Text(v.to_string()));
    match check {
        FormatCheck::Doi => text(validate_doi(value)),
        FormatCheck::Country => text(validate_country(value, countries)),
        FormatCheck::LatLongDegree => text(validate_lat_long(value)),
        FormatCheck::NumericUnit => text(validate_numeric(value)),
        FormatCheck::Email => text(validate_email(value)),
        FormatCheck::UrlOrFilename => text(validate_url_or_filename(value)),
        FormatCheck::UrlOrDoi => text(validate_url_or_doi(value)),
        FormatCheck::KeyValueList => validate_key_value_list(value).map(FieldValue::Map),
        FormatCheck::Hierarchy => text(validate_hierarchy(value)),
    }
}

/// An occurrence count outside the permitted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub struct CardinalityError {
    pub count: usize,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl fmt::Display for CardinalityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), _) if self.count < min => write!(
                f,
                "Fail cardinality constraint requirement: min count: {min}, length: {}",
                self.count
            ),
            (_, Some(max)) => write!(
                f,
                "Fail cardinality constraint requirement: max count: {max}, length: {}",
                self.count
            ),
            _ => write!(f, "Fail cardinality constraint requirement: length: {}", self.count),
        }
    }
}

/// Number of non-blank items of a delimiter-joined value; absent is zero.
pub fn count_occurrences(value: Option<&str>, delimiter: char) -> usize {
    value.map_or(0, |value| {
        value
            .split(delimiter)
            .filter(|item| !item.trim().is_empty())
            .count()
    })
}

/// Checks a count against optional bounds.
pub fn check_count(
    count: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<usize, CardinalityError> {
    let too_few = min.is_some_and(|min| count < min);
    let too_many = max.is_some_and(|max| count > max);
    if too_few || too_many {
        Err(CardinalityError { count, min, max })
    } else {
        Ok(count)
    }
}

/// Counts the items of a raw value and checks them against the bounds.
///
/// The value itself is never transformed.
pub fn validate_value_count(
    value: Option<&str>,
    delimiter: char,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<usize, CardinalityError> {
    check_count(count_occurrences(value, delimiter), min, max)
}
