use std::fs;

use boq_cli::overrides::{ColumnAssignment, apply_overrides};
use boq_core::{ImportContext, ImportSession};
use boq_model::FieldKey;

fn open(contents: &str) -> (tempfile::TempDir, ImportSession) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("見積.csv");
    fs::write(&path, contents).expect("write csv");
    let session = ImportSession::open_path(&ImportContext::new(), &path).expect("open session");
    (dir, session)
}

#[test]
fn explicit_mapping_overrides_detection() {
    let (_dir, mut session) = open("品名,数量,単価,見積単価\n配線工事,100,500,450\n");
    assert!(session.mapping().is_locked(FieldKey::UnitPrice));

    let assignments = ["unit_price=D".parse::<ColumnAssignment>().unwrap()];
    apply_overrides(&mut session, &assignments, &[]).unwrap();

    assert_eq!(session.mapping().column_map().get(FieldKey::UnitPrice), Some(3));
    assert_eq!(session.preview()[0].unit_price, "450");
    assert_eq!(session.preview()[0].amount, 45_000);
}

#[test]
fn unmap_removes_detected_fields() {
    let (_dir, mut session) = open("品名,数量,単価,金額\n配線工事,2,300,999\n");
    assert_eq!(session.preview()[0].amount, 999);

    apply_overrides(&mut session, &[], &[FieldKey::Amount]).unwrap();
    assert!(!session.mapping().column_map().contains(FieldKey::Amount));
    assert_eq!(session.preview()[0].amount, 600);
}

#[test]
fn out_of_range_columns_are_reported() {
    let (_dir, mut session) = open("品名,数量,単価\n配線工事,1,1\n");
    let assignments = ["cost_price=Z".parse::<ColumnAssignment>().unwrap()];
    let err = apply_overrides(&mut session, &assignments, &[]).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"column 25 is out of range (sheet has 3 columns)"
    );
}
