//! Per-category sheet validators compiled from a schema.

use miappe_model::{
    CardinalityRule, Category, CategorySchema, FieldSchema, FieldValue, FormatRule, Issue,
    PrimitiveType, ValidatedRecord, ValidationOutcome, ValidationRecord,
};
use miappe_standards::{CountryTable, cardinality, countries, format};
use serde_json::{Map, Value, json};

use crate::validators::{
    DEFAULT_DELIMITER, FieldValidationError, apply_check, check_count, count_occurrences,
    parse_temporal,
};

/// Compiled rules for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub schema: FieldSchema,
    pub format: &'static FormatRule,
    pub cardinality: &'static CardinalityRule,
}

impl FieldRule {
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn is_required(&self) -> bool {
        self.cardinality.required
    }

    /// Multi-valued fields are checked item by item.
    pub fn is_multi_valued(&self) -> bool {
        self.cardinality.allows_many() && !self.format.check.is_some_and(|c| c.is_structured())
    }
}

/// Validation model for one category: one rule per schema field, in schema order.
#[derive(Debug, Clone)]
pub struct SheetValidator {
    category: Category,
    delimiter: char,
    fields: Vec<FieldRule>,
    countries: &'static CountryTable,
}

impl SheetValidator {
    /// Compiles a schema with the default `;` delimiter.
    pub fn build(schema: &CategorySchema) -> miappe_standards::Result<Self> {
        Self::build_with_delimiter(schema, DEFAULT_DELIMITER)
    }

    /// Resolves every field's format and cardinality labels.
    ///
    /// An unknown label is a configuration error and fails the whole build.
    pub fn build_with_delimiter(
        schema: &CategorySchema,
        delimiter: char,
    ) -> miappe_standards::Result<Self> {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                Ok(FieldRule {
                    format: format::lookup(&field.format_label)?,
                    cardinality: cardinality::lookup(&field.cardinality_label)?,
                    schema: field.clone(),
                })
            })
            .collect::<miappe_standards::Result<Vec<_>>>()?;

        Ok(Self {
            category: schema.category,
            delimiter,
            fields,
            countries: countries(),
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter().filter(|field| field.is_required())
    }

    /// Evaluates every field of a record; never stops at the first failure.
    pub fn validate(&self, record: &ValidationRecord) -> ValidationOutcome {
        for column in record.keys() {
            if self.field(column).is_none() {
                tracing::debug!(category = %self.category, column, "ignoring unknown column");
            }
        }

        let mut accepted = ValidatedRecord::new();
        let mut issues = Vec::new();
        for field in &self.fields {
            let raw = record
                .get(field.name())
                .and_then(Option::as_deref)
                .map(str::trim)
                .filter(|value| !value.is_empty());
            match self.evaluate(field, raw) {
                Ok(Some(value)) => {
                    accepted.insert(field.name().to_string(), value);
                }
                Ok(None) => {}
                Err(issue) => issues.push(issue),
            }
        }

        if issues.is_empty() {
            ValidationOutcome::Accepted(accepted)
        } else {
            ValidationOutcome::Rejected(issues)
        }
    }

    /// Format check first, then cardinality.
    fn evaluate(&self, field: &FieldRule, raw: Option<&str>) -> Result<Option<FieldValue>, Issue> {
        let value = match raw {
            Some(raw) => self.coerce(field, raw).map_err(|err| Issue::InvalidFormat {
                field: field.name().to_string(),
                value: err.value,
                reason: err.reason,
            })?,
            None => None,
        };

        let count = match &value {
            Some(FieldValue::Map(_)) => 1,
            _ => count_occurrences(raw, self.delimiter),
        };
        let rule = field.cardinality;
        check_count(count, rule.min_count, rule.max_count).map_err(|err| {
            if count == 0 && rule.required {
                Issue::RequiredMissing {
                    field: field.name().to_string(),
                }
            } else {
                Issue::Cardinality {
                    field: field.name().to_string(),
                    value: raw.map(str::to_string),
                    count: err.count,
                    min: err.min,
                    max: err.max,
                }
            }
        })?;

        Ok(value)
    }

    /// Applies the primitive type and format validator to a present value.
    ///
    /// A multi-valued value holding only delimiters has no items and is
    /// treated as absent.
    fn coerce(
        &self,
        field: &FieldRule,
        raw: &str,
    ) -> Result<Option<FieldValue>, FieldValidationError> {
        let items: Vec<&str> = if field.is_multi_valued() {
            raw.split(self.delimiter)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect()
        } else {
            vec![raw]
        };
        if items.is_empty() {
            return Ok(None);
        }

        let value = match (field.format.primitive, field.format.check) {
            (PrimitiveType::DateTime, _) => items
                .into_iter()
                .map(parse_temporal)
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::Temporal)?,
            (_, Some(check)) if check.is_structured() => apply_check(check, raw, self.countries)?,
            (_, Some(check)) => {
                for item in items {
                    apply_check(check, item, self.countries)?;
                }
                FieldValue::Text(raw.to_string())
            }
            (_, None) => FieldValue::Text(raw.to_string()),
        };
        Ok(Some(value))
    }

    /// JSON Schema describing the records this validator accepts.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            let item_type = match (field.format.primitive, field.format.check) {
                (PrimitiveType::DateTime, _) => json!({ "type": "string", "format": "date-time" }),
                (_, Some(check)) if check.is_structured() => json!({
                    "type": "object",
                    "additionalProperties": { "type": "string" }
                }),
                _ => json!({ "type": "string" }),
            };

            let mut property = Map::new();
            property.insert("title".into(), json!(field.schema.title));
            if !field.schema.definition.is_empty() {
                property.insert("description".into(), json!(field.schema.definition));
            }
            if !field.schema.example.is_empty() {
                property.insert("examples".into(), json!([field.schema.example]));
            }
            property.insert("x-miappe-format".into(), json!(field.format.label));
            property.insert(
                "x-miappe-cardinality".into(),
                json!(field.schema.cardinality_label),
            );
            if field.is_multi_valued() {
                property.insert("type".into(), json!("array"));
                property.insert("items".into(), item_type);
                if let Some(min) = field.cardinality.min_count.filter(|min| *min > 0) {
                    property.insert("minItems".into(), json!(min));
                }
                if let Some(max) = field.cardinality.max_count {
                    property.insert("maxItems".into(), json!(max));
                }
            } else if let Value::Object(item) = item_type {
                property.extend(item);
            }
            properties.insert(field.name().to_string(), Value::Object(property));
        }

        let required: Vec<&str> = self.required_fields().map(FieldRule::name).collect();
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": self.category.sheet_name(),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
