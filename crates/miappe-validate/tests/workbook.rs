//! Whole-workbook validation through `MetadataIo`.

use std::sync::Arc;

use miappe_ingest::{RawSheet, Workbook};
use miappe_model::{Category, Issue};
use miappe_standards::{DirectorySource, SchemaLoader, StandardsError};
use miappe_validate::{FailurePolicy, MetadataIo, MetadataIoOptions, ValidateError, ValidatorFactory};
use tempfile::TempDir;

const STUDY_HEADER: [&str; 10] = [
    "Field",
    "Study unique ID",
    "Study title",
    "Start date of study",
    "Contact institution",
    "Geographic location (country)",
    "Experimental site name",
    "Description of the experimental design",
    "Description of growth facility",
    "Geographic location (latitude)",
];

const VALID_STUDY: [&str; 10] = [
    "",
    "STU-1",
    "Drought tolerance 2019",
    "2019-04-02",
    "INRAE",
    "FR",
    "Mauguio",
    "Randomized blocks",
    "Field",
    "43.619264",
];

fn investigation() -> RawSheet {
    RawSheet::from_rows(
        "Investigation",
        vec![
            vec!["Field", "Definition", "Value"],
            vec!["Investigation unique ID", "", "INV-1"],
            vec!["Investigation title", "", "Drought study"],
            vec!["MIAPPE version", "", "1.1"],
        ],
    )
}

fn study(records: &[[&str; 10]]) -> RawSheet {
    let mut rows: Vec<Vec<&str>> = vec![STUDY_HEADER.to_vec()];
    rows.push(vec!["Definition"; 10]);
    rows.push(vec!["Example"; 10]);
    rows.push(vec!["Format"; 10]);
    rows.extend(records.iter().map(|record| record.to_vec()));
    RawSheet::from_rows("Study", rows)
}

/// Every category sheet, with header-only sheets for the ones not under test.
fn workbook(study_records: &[[&str; 10]]) -> Workbook {
    let mut sheets = vec![investigation(), study(study_records)];
    for category in Category::ALL {
        if !matches!(category, Category::Investigation | Category::Study) {
            sheets.push(RawSheet::from_rows(category.sheet_name(), vec![vec!["Field"]]));
        }
    }
    Workbook::from_sheets(sheets)
}

fn options() -> MetadataIoOptions {
    MetadataIoOptions::default().with_factory(Arc::new(ValidatorFactory::default()))
}

#[test]
fn valid_workbook_is_accepted() {
    let io = MetadataIo::from_workbook(&workbook(&[VALID_STUDY]), options()).unwrap();
    let report = io.report().expect("validated on construction");
    assert_eq!(report.len(), 2);
    assert!(report.is_valid(), "{:?}", report.rejected().collect::<Vec<_>>());

    let study = report.for_category(Category::Study).next().unwrap();
    assert_eq!(study.sheet_row, Some(5));
    let record = study.outcome.record().unwrap();
    assert_eq!(record["geographic_location_(country)"].as_text(), Some("FR"));
}

#[test]
fn collect_reports_every_rejected_record() {
    let mut missing_title = VALID_STUDY;
    missing_title[2] = "";
    let mut bad_country = VALID_STUDY;
    bad_country[5] = "UK";
    bad_country[9] = "35.6895'N";

    let io = MetadataIo::from_workbook(
        &workbook(&[missing_title, VALID_STUDY, bad_country]),
        options(),
    )
    .unwrap();
    let report = io.report().unwrap();
    assert_eq!(report.len(), 4);
    assert_eq!(report.rejected_count(), 2);
    assert_eq!(report.summary()[&Category::Study].accepted, 1);

    let rejected: Vec<_> = report.rejected().collect();
    assert_eq!(rejected[0].sheet_row, Some(5));
    assert_eq!(
        rejected[0].issues(),
        [Issue::RequiredMissing {
            field: "study_title".to_string()
        }]
    );
    assert_eq!(rejected[1].sheet_row, Some(7));
    let fields: Vec<&str> = rejected[1].issues().iter().map(Issue::field).collect();
    assert_eq!(
        fields,
        ["geographic_location_(country)", "geographic_location_(latitude)"]
    );
}

#[test]
fn fail_fast_stops_at_first_rejection() {
    let mut missing_id = VALID_STUDY;
    missing_id[1] = "";
    let options = options().with_failure_policy(FailurePolicy::FailFast);

    let err = MetadataIo::from_workbook(&workbook(&[VALID_STUDY, missing_id]), options).unwrap_err();
    match err {
        ValidateError::RecordRejected {
            category,
            record,
            sheet_row,
            issues,
        } => {
            assert_eq!(category, Category::Study);
            assert_eq!(record, 1);
            assert_eq!(sheet_row, Some(6));
            assert_eq!(issues.len(), 1);
        }
        other => panic!("expected RecordRejected, got {other:?}"),
    }
}

#[test]
fn deferred_validation_and_frames() {
    let options = options().with_validate(false);
    let io = MetadataIo::from_workbook(&workbook(&[VALID_STUDY, VALID_STUDY]), options).unwrap();
    assert!(io.report().is_none());

    let frames = io.frames();
    assert_eq!(frames.len(), Category::ALL.len());
    assert_eq!(frames[&Category::Study].height(), 2);
    assert_eq!(frames[&Category::Investigation].height(), 1);
    assert_eq!(frames[&Category::Person].height(), 0);

    let outcomes = io.validate_category(Category::Study).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_accepted()));
}

#[test]
fn missing_schema_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let factory = ValidatorFactory::new(SchemaLoader::new(Arc::new(DirectorySource::new(
        dir.path(),
    ))));
    let options = MetadataIoOptions::default().with_factory(Arc::new(factory));

    let err = MetadataIo::from_workbook(&workbook(&[VALID_STUDY]), options).unwrap_err();
    assert!(matches!(
        err,
        ValidateError::Standards(StandardsError::SchemaNotFound {
            category: Category::Investigation,
            ..
        })
    ));
}

#[test]
fn missing_sheet_is_a_read_error() {
    let workbook = Workbook::from_sheets(vec![investigation()]);
    let err = MetadataIo::from_workbook(&workbook, options()).unwrap_err();
    assert!(matches!(err, ValidateError::Ingest(_)));
}

#[test]
fn opens_delimited_directory() {
    let dir = TempDir::new().unwrap();
    let tsv = |sheet: &RawSheet| {
        sheet
            .rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    for sheet in workbook(&[VALID_STUDY]).sheets() {
        std::fs::write(dir.path().join(format!("{}.tsv", sheet.name)), tsv(sheet)).unwrap();
    }

    let io = MetadataIo::open_with(dir.path(), options()).unwrap();
    assert_eq!(io.path(), Some(dir.path()));
    assert!(io.report().unwrap().is_valid());
}

#[test]
fn open_missing_file() {
    let err = MetadataIo::open("/definitely/not/here.xlsx").unwrap_err();
    assert!(matches!(err, ValidateError::Ingest(_)));
}
