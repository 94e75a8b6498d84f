use boq_map::{DataRows, DetectOptions, HeaderSynonymDictionary, detect_header};
use boq_model::{CellValue, ColumnMap, FieldKey, QuoteItem, RawGrid, Unit};
use boq_transform::{CommitError, MergeMode, commit, normalize};
use proptest::prelude::*;

fn detected(grid: &RawGrid) -> (DataRows, ColumnMap) {
    let detection = detect_header(grid, &HeaderSynonymDictionary::builtin(), &DetectOptions::default());
    (detection.data_rows, detection.column_map)
}

#[test]
fn imports_a_simple_sheet() {
    let grid = RawGrid::from_strings([vec!["品名", "数量", "単価"], vec!["配線工事", "100", "500"]]);
    let (rows, map) = detected(&grid);
    let out = normalize(&rows, &map);

    assert_eq!(out.items.len(), 1);
    assert_eq!(out.items[0].name, "配線工事");
    assert_eq!(out.items[0].quantity, "100");
    assert_eq!(out.items[0].unit_price, "500");
    assert_eq!(out.items[0].unit, Unit::Lot);
    assert_eq!(out.items[0].amount, 50_000);
    assert!(out.warnings.is_empty());
}

#[test]
fn bad_numbers_warn_with_sheet_row_numbers() {
    let grid = RawGrid::from_strings([
        vec!["見積書", "", "", ""],
        vec!["品名", "数量", "単位", "単価"],
        vec!["配線工事", "abc", "m", "500"],
        vec!["", "", "", ""],
        vec!["照明器具", "２０", "台", "８，０００"],
        vec!["", "5", "", "100"],
        vec!["盤改修", "1", "式", "-3"],
    ]);
    let (rows, map) = detected(&grid);
    let out = normalize(&rows, &map);

    let names: Vec<&str> = out.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["配線工事", "照明器具", "盤改修"]);
    let seqs: Vec<usize> = out.items.iter().map(|item| item.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2]);

    assert_eq!(out.items[0].quantity, "0");
    assert_eq!(out.items[0].unit, Unit::Meter);
    assert_eq!(out.items[1].amount, 160_000);
    assert_eq!(out.items[1].unit, Unit::Machine);

    let messages: Vec<String> = out.warnings.iter().map(ToString::to_string).collect();
    insta::assert_debug_snapshot!(messages, @r#"
    [
        "row 3: quantity value \"abc\" is not a number, imported as 0",
        "row 7: unit_price value \"-3\" is not a number, imported as 0",
    ]
    "#);
}

#[test]
fn unknown_units_default_to_lot() {
    let grid = RawGrid::from_strings([
        vec!["品名", "数量", "単位", "単価"],
        vec!["配管", "3", "km", "100"],
    ]);
    let (rows, map) = detected(&grid);
    assert_eq!(normalize(&rows, &map).items[0].unit, Unit::Lot);
}

#[test]
fn unparseable_amount_warns_and_falls_back() {
    let grid = RawGrid::new(vec![
        vec!["品名".into(), "数量".into(), "単価".into(), "金額".into()],
        vec!["配線工事".into(), 2.0.into(), 300.0.into(), "別途".into()],
    ]);
    let (rows, map) = detected(&grid);
    let out = normalize(&rows, &map);
    assert_eq!(out.items[0].amount, 600);
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].field, FieldKey::Amount);
    assert_eq!(out.warnings[0].row, 2);
}

#[test]
fn add_appends_and_renumbers() {
    let mut existing = QuoteItem::empty(0);
    existing.name = "既存".to_string();
    let grid = RawGrid::from_strings([vec!["品名", "数量", "単価"], vec!["配線工事", "100", "500"]]);
    let (rows, map) = detected(&grid);
    let preview = normalize(&rows, &map).items;

    let merged = commit(&[existing.clone()], &preview, MergeMode::Add, &map).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0], existing);
    assert_eq!(merged[1].seq, 1);
    assert_eq!(merged[1].name, "配線工事");
    assert_eq!(merged[1].quantity, 100.0);
    assert_eq!(merged[1].unit_price, 500);
    assert_eq!(merged[1].amount, 50_000);

    let replaced = commit(&[existing], &preview, MergeMode::Replace, &map).unwrap();
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].seq, 0);
}

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        "[a-z配線 ]{0,6}".prop_map(CellValue::text),
        "[0-9,.-]{0,6}".prop_map(CellValue::text),
        (-10.0f64..1e6).prop_map(CellValue::Number),
    ]
}

proptest! {
    #[test]
    fn normalization_is_repeatable_and_contiguous(
        rows in prop::collection::vec(prop::collection::vec(cell(), 0..7), 0..20),
        first in 0usize..5,
    ) {
        let data = DataRows::new(rows, first);
        let map = ColumnMap::positional_fallback();
        let once = normalize(&data, &map);
        let twice = normalize(&data, &map);
        prop_assert_eq!(&once, &twice);

        for (index, item) in once.items.iter().enumerate() {
            prop_assert_eq!(item.seq, index);
            prop_assert!(!item.name.trim().is_empty());
        }
        for warning in &once.warnings {
            prop_assert!(warning.row > first);
            prop_assert!(warning.row <= first + data.len());
        }
    }

    #[test]
    fn merge_keeps_seq_contiguous(
        rows in prop::collection::vec(prop::collection::vec(cell(), 0..7), 0..20),
        existing_len in 0usize..12,
        replace in any::<bool>(),
    ) {
        let map = ColumnMap::positional_fallback();
        let preview = normalize(&DataRows::new(rows, 1), &map).items;
        let existing: Vec<QuoteItem> = (0..existing_len).map(QuoteItem::empty).collect();
        let mode = if replace { MergeMode::Replace } else { MergeMode::Add };

        let merged = commit(&existing, &preview, mode, &map).unwrap();
        let expected = match mode {
            MergeMode::Add => existing_len + preview.len(),
            MergeMode::Replace => preview.len(),
        };
        prop_assert_eq!(merged.len(), expected);
        for (index, item) in merged.iter().enumerate() {
            prop_assert_eq!(item.seq, index);
        }
        if mode == MergeMode::Replace {
            for (item, source) in merged.iter().zip(&preview) {
                prop_assert_eq!(&item.name, &source.name);
            }
        }
    }

    #[test]
    fn commit_requires_every_mandatory_field(
        missing in prop::sample::select(FieldKey::MANDATORY.to_vec()),
        existing_len in 0usize..4,
        replace in any::<bool>(),
    ) {
        let mut map = ColumnMap::positional_fallback();
        map.assign(FieldKey::Category, 6);
        map.assign(FieldKey::CostPrice, 7);
        map.clear(missing);
        let existing: Vec<QuoteItem> = (0..existing_len).map(QuoteItem::empty).collect();
        let mode = if replace { MergeMode::Replace } else { MergeMode::Add };

        let result = commit(&existing, &[], mode, &map);
        prop_assert_eq!(result, Err(CommitError::IncompleteMapping { missing: vec![missing] }));
    }
}

#[test]
fn commit_rejects_missing_name_with_all_optional_fields_mapped() {
    let map: ColumnMap = FieldKey::ALL
        .into_iter()
        .filter(|field| *field != FieldKey::Name)
        .enumerate()
        .map(|(column, field)| (field, column))
        .collect();
    let err = commit(&[], &[], MergeMode::Add, &map).unwrap_err();
    assert_eq!(err.to_string(), "required fields are not mapped: 品名");
}
