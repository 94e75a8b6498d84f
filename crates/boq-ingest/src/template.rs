//! The downloadable import template.
//!
//! The header row lists every field in the fixed template order, so a filled
//! template is recognized without any manual mapping.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use boq_model::FieldKey;

use crate::error::Result;

pub const TEMPLATE_SHEET_NAME: &str = "見積明細";

struct ExampleRow {
    category: &'static str,
    name: &'static str,
    specification: &'static str,
    quantity: f64,
    unit: &'static str,
    unit_price: f64,
    cost_price: f64,
}

// Illustrative only.
const EXAMPLE_ROWS: [ExampleRow; 3] = [
    ExampleRow {
        category: "電気設備",
        name: "配線工事",
        specification: "VVF2.0-3C",
        quantity: 100.0,
        unit: "m",
        unit_price: 500.0,
        cost_price: 350.0,
    },
    ExampleRow {
        category: "電気設備",
        name: "分電盤設置",
        specification: "主幹75A",
        quantity: 1.0,
        unit: "台",
        unit_price: 120_000.0,
        cost_price: 90_000.0,
    },
    ExampleRow {
        category: "共通",
        name: "諸経費",
        specification: "",
        quantity: 1.0,
        unit: "式",
        unit_price: 30_000.0,
        cost_price: 0.0,
    },
];

/// Header labels in template column order.
pub fn template_header() -> [&'static str; 8] {
    FieldKey::ALL.map(FieldKey::label)
}

/// Builds the template workbook in memory.
pub fn build_template() -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, label) in template_header().into_iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, label, &bold)?;
        worksheet.set_column_width(col, 14.0)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (offset, example) in EXAMPLE_ROWS.iter().enumerate() {
        let row = offset as u32 + 1;
        worksheet.write_string(row, 0, example.category)?;
        worksheet.write_string(row, 1, example.name)?;
        if !example.specification.is_empty() {
            worksheet.write_string(row, 2, example.specification)?;
        }
        worksheet.write_number(row, 3, example.quantity)?;
        worksheet.write_string(row, 4, example.unit)?;
        worksheet.write_number(row, 5, example.unit_price)?;
        worksheet.write_number(row, 6, example.cost_price)?;
        worksheet.write_number(row, 7, (example.quantity * example.unit_price).floor())?;
    }

    Ok(workbook)
}

/// Serializes the template to `.xlsx` bytes.
pub fn template_bytes() -> Result<Vec<u8>> {
    let mut workbook = build_template()?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes the template to `path`.
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = build_template()?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), "wrote import template");
    Ok(())
}
