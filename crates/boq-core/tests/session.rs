use std::io::Write;

use boq_core::{ImportConfig, ImportContext, ImportSession, SessionError};
use boq_ingest::{IngestError, SpreadsheetSource, template_bytes};
use boq_map::MappingError;
use boq_model::{FieldKey, QuoteItem, Unit};
use boq_transform::{CommitError, MergeMode};

fn csv_source(text: &str) -> SpreadsheetSource {
    SpreadsheetSource::from_bytes("quote.csv", Some("text/csv".to_string()), text.as_bytes().to_vec())
}

#[test]
fn imports_the_template_without_manual_mapping() {
    let source = SpreadsheetSource::from_bytes("見積明細.xlsx", None, template_bytes().unwrap());
    let session = ImportSession::open(&ImportContext::new(), &source).unwrap();

    assert_eq!(session.mapping().summary().mapped, 8);
    assert!(session.mapping().missing_mandatory().is_empty());
    assert_eq!(session.preview().len(), 3);
    assert_eq!(session.preview()[0].unit, Unit::Meter);
    assert_eq!(session.preview()[0].amount, 50_000);
    assert!(session.warnings().is_empty());

    let merged = session.confirm(&[], MergeMode::Replace).unwrap();
    let names: Vec<&str> = merged.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["配線工事", "分電盤設置", "諸経費"]);
}

#[test]
fn locked_fields_must_be_unlocked_before_remapping() {
    let mut session = ImportSession::open(
        &ImportContext::new(),
        &csv_source("品名,数量,単価,別名\n配線工事,100,500,電線\n"),
    )
    .unwrap();

    let err = session.assign_column(FieldKey::Name, 3).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Mapping(MappingError::FieldLocked(FieldKey::Name))
    ));

    assert!(session.unlock_field(FieldKey::Name));
    session.assign_column(FieldKey::Name, 3).unwrap();
    assert_eq!(session.preview()[0].name, "電線");
}

#[test]
fn incomplete_mapping_keeps_the_session_usable() {
    let mut session =
        ImportSession::open(&ImportContext::new(), &csv_source("品名,単価\n配線工事,500\n")).unwrap();
    let existing = vec![QuoteItem::empty(0)];

    let err = session.confirm(&existing, MergeMode::Add).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Commit(CommitError::IncompleteMapping { .. })
    ));
    assert_eq!(session.preview().len(), 1);

    session.edit_preview(0, FieldKey::Quantity, "3").unwrap();
    session.assign_column(FieldKey::Quantity, 1).unwrap();
    let merged = session.confirm(&existing, MergeMode::Add).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1].quantity, 500.0);
}

#[test]
fn configured_limits_apply() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[limits]\nmax_file_size = 10\n\n[[synonyms]]\nlabel = \"内訳\"\nfield = \"name\""
    )
    .unwrap();
    let config = ImportConfig::load(file.path()).unwrap();
    let ctx = ImportContext::from_config(&config);

    let err = ImportSession::open(&ctx, &csv_source("内訳,数量,単価\n配線工事,1,1\n")).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Ingest(IngestError::FileTooLarge { max_size: 10, .. })
    ));
}

#[test]
fn configured_synonyms_are_used() {
    let config: ImportConfig =
        toml::from_str("[[synonyms]]\nlabel = \"内訳\"\nfield = \"name\"\n").unwrap();
    let ctx = ImportContext::from_config(&config);
    let session =
        ImportSession::open(&ctx, &csv_source("内訳,数量,単価\n配線工事,2,300\n")).unwrap();
    assert!(session.mapping().is_locked(FieldKey::Name));
    assert_eq!(session.preview()[0].amount, 600);
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ImportConfig::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, boq_core::ConfigError::Read { .. }));
}
