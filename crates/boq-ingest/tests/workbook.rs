use boq_ingest::{
    IngestError, SpreadsheetSource, read_grid, read_grid_from_path, template_bytes, write_template,
    ReadOptions,
};
use boq_model::CellValue;
use rust_xlsxwriter::Workbook;

fn xlsx_source(name: &str, build: impl FnOnce(&mut Workbook)) -> SpreadsheetSource {
    let mut workbook = Workbook::new();
    build(&mut workbook);
    let bytes = workbook.save_to_buffer().expect("save workbook");
    SpreadsheetSource::from_bytes(name, None, bytes)
}

#[test]
fn reads_first_sheet_only() {
    let source = xlsx_source("two-sheets.xlsx", |wb| {
        let first = wb.add_worksheet();
        first.write_string(0, 0, "品名").unwrap();
        first.write_string(0, 1, "数量").unwrap();
        first.write_string(1, 0, "配線工事").unwrap();
        first.write_number(1, 1, 100.0).unwrap();
        let second = wb.add_worksheet();
        second.write_string(0, 0, "ignored").unwrap();
    });

    let grid = read_grid(&source).expect("read grid");
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.cell(0, 0), Some(&CellValue::Text("品名".to_string())));
    assert_eq!(grid.cell(1, 1), Some(&CellValue::Number(100.0)));
}

#[test]
fn pads_sheets_that_do_not_start_at_a1() {
    let source = xlsx_source("offset.xlsx", |wb| {
        let sheet = wb.add_worksheet();
        sheet.write_string(2, 1, "品名").unwrap();
        sheet.write_string(2, 2, "単価").unwrap();
    });

    let grid = read_grid(&source).expect("read grid");
    assert_eq!(grid.len(), 3);
    assert!(grid.rows()[0].is_empty());
    assert_eq!(grid.cell(2, 0), Some(&CellValue::Empty));
    assert_eq!(grid.cell(2, 1), Some(&CellValue::Text("品名".to_string())));
    assert_eq!(grid.cell(2, 2), Some(&CellValue::Text("単価".to_string())));
}

#[test]
fn extension_mismatch_does_not_block_real_workbooks() {
    let bytes = template_bytes().expect("template");
    let source = SpreadsheetSource::from_bytes("download", None, bytes);
    let grid = read_grid(&source).expect("read grid");
    assert_eq!(grid.len(), 4);
}

#[test]
fn rejects_non_spreadsheets() {
    let source = SpreadsheetSource::from_bytes(
        "report.pdf",
        Some("application/pdf".to_string()),
        b"%PDF-1.7".to_vec(),
    );
    assert!(matches!(
        read_grid(&source),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn template_written_to_disk_reads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("template.xlsx");
    write_template(&path).expect("write template");

    let grid = read_grid_from_path(&path, &ReadOptions::default()).expect("read template");
    let header: Vec<String> = grid.rows()[0].iter().map(CellValue::to_text).collect();
    assert_eq!(
        header,
        vec!["分類", "品名", "仕様", "数量", "単位", "単価", "原価", "金額"]
    );
    assert_eq!(grid.cell(1, 7), Some(&CellValue::Number(50_000.0)));
}
