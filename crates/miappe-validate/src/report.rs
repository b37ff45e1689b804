//! Validation report for a whole workbook.

use std::collections::BTreeMap;

use miappe_model::{Category, Issue, ValidationOutcome};
use serde::Serialize;

/// Outcome of one record, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordOutcome {
    pub category: Category,
    /// Zero-based record index within the category table.
    pub record: usize,
    /// One-based sheet row; `None` for the transposed Investigation sheet.
    pub sheet_row: Option<usize>,
    pub outcome: ValidationOutcome,
}

impl RecordOutcome {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    pub fn issues(&self) -> &[Issue] {
        self.outcome.issues()
    }

    /// Human-readable location, e.g. `Study row 5` or `Investigation`.
    pub fn location(&self) -> String {
        match self.sheet_row {
            Some(row) => format!("{} row {row}", self.category),
            None => self.category.to_string(),
        }
    }
}

/// Accepted and rejected record counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl CategorySummary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Every record outcome of a validation run, in category then record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    outcomes: Vec<RecordOutcome>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[RecordOutcome] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of evaluated records.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.len() - self.accepted_count()
    }

    /// Total number of field issues across all rejected records.
    pub fn issue_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.issues().len()).sum()
    }

    /// True when no record was rejected.
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(RecordOutcome::is_accepted)
    }

    pub fn rejected(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_accepted())
    }

    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(move |o| o.category == category)
    }

    /// Per-category counts, in category order.
    pub fn summary(&self) -> BTreeMap<Category, CategorySummary> {
        let mut summary: BTreeMap<Category, CategorySummary> = BTreeMap::new();
        for outcome in &self.outcomes {
            let entry = summary.entry(outcome.category).or_default();
            if outcome.is_accepted() {
                entry.accepted += 1;
            } else {
                entry.rejected += 1;
            }
        }
        summary
    }
}

impl Extend<RecordOutcome> for ValidationReport {
    fn extend<T: IntoIterator<Item = RecordOutcome>>(&mut self, iter: T) {
        self.outcomes.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miappe_model::ValidatedRecord;

    fn outcome(category: Category, row: Option<usize>, accepted: bool) -> RecordOutcome {
        let outcome = if accepted {
            ValidationOutcome::Accepted(ValidatedRecord::new())
        } else {
            ValidationOutcome::Rejected(vec![Issue::RequiredMissing {
                field: "study_unique_id".into(),
            }])
        };
        RecordOutcome {
            category,
            record: 0,
            sheet_row: row,
            outcome,
        }
    }

    #[test]
    fn counts_and_summary() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());
        report.push(outcome(Category::Investigation, None, true));
        report.push(outcome(Category::Study, Some(5), false));
        report.push(outcome(Category::Study, Some(6), true));

        assert_eq!(report.len(), 3);
        assert_eq!(report.accepted_count(), 2);
        assert_eq!(report.rejected_count(), 1);
        assert_eq!(report.issue_count(), 1);
        assert!(!report.is_valid());

        let summary = report.summary();
        assert_eq!(summary[&Category::Study], CategorySummary { accepted: 1, rejected: 1 });
        assert_eq!(summary[&Category::Investigation].total(), 1);

        let rejected: Vec<String> = report.rejected().map(RecordOutcome::location).collect();
        assert_eq!(rejected, ["Study row 5"]);
    }
}
