//! Data rows to preview items.

use serde::{Deserialize, Serialize};
use tracing::debug;

use boq_map::DataRows;
use boq_model::{
    CellValue, ColumnMap, FieldKey, ParseWarning, PreviewItem, RawRow, Unit, format_number,
    line_amount,
};

use crate::numeric::{Coerced, coerce_cell, parse_numeric, truncate_to_yen};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Preview items and the warnings raised while building them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedRows {
    pub items: Vec<PreviewItem>,
    pub warnings: Vec<ParseWarning>,
}

/// Converts data rows into preview items under `column_map`.
///
/// Fully blank rows and rows without a name are dropped. Numeric cells that
/// cannot be read become zero and are reported as [`ParseWarning`]s. The
/// function is pure: the same rows and map always give the same result.
pub fn normalize(data_rows: &DataRows, column_map: &ColumnMap) -> NormalizedRows {
    let mut out = NormalizedRows::default();

    for (offset, row) in data_rows.rows().iter().enumerate() {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        let reader = RowReader {
            row,
            column_map,
            display_row: data_rows.display_row(offset),
        };

        let name = reader.text(FieldKey::Name);
        if name.is_empty() {
            continue;
        }

        let quantity = reader.number(FieldKey::Quantity, &mut out.warnings);
        let unit_price = truncate_to_yen(reader.number(FieldKey::UnitPrice, &mut out.warnings));
        let cost_price = truncate_to_yen(reader.number(FieldKey::CostPrice, &mut out.warnings));
        let amount = reader
            .amount(&mut out.warnings)
            .unwrap_or_else(|| line_amount(quantity, unit_price));

        out.items.push(PreviewItem {
            seq: out.items.len(),
            category: reader.text(FieldKey::Category),
            name,
            specification: reader.text(FieldKey::Specification),
            quantity: format_number(quantity),
            unit: Unit::parse_or_default(&reader.text(FieldKey::Unit)),
            unit_price: unit_price.to_string(),
            cost_price: cost_price.to_string(),
            amount,
        });
    }

    debug!(
        rows = data_rows.len(),
        items = out.items.len(),
        warnings = out.warnings.len(),
        "normalized rows"
    );
    out
}

struct RowReader<'a> {
    row: &'a RawRow,
    column_map: &'a ColumnMap,
    display_row: usize,
}

impl RowReader<'_> {
    /// `None` when the field is unmapped. Columns past the row's end read as
    /// empty.
    fn cell(&self, field: FieldKey) -> Option<&CellValue> {
        self.column_map
            .get(field)
            .map(|column| self.row.get(column).unwrap_or(&EMPTY_CELL))
    }

    fn text(&self, field: FieldKey) -> String {
        self.cell(field)
            .map(|cell| cell.to_text().trim().to_string())
            .unwrap_or_default()
    }

    fn number(&self, field: FieldKey, warnings: &mut Vec<ParseWarning>) -> f64 {
        let Some(cell) = self.cell(field) else {
            return 0.0;
        };
        let coerced = coerce_cell(cell);
        if coerced == Coerced::Invalid {
            warnings.push(self.warning(field, cell));
        }
        coerced.or_zero()
    }

    /// A usable amount cell, or `None` to compute the amount.
    fn amount(&self, warnings: &mut Vec<ParseWarning>) -> Option<u64> {
        let cell = self.cell(FieldKey::Amount)?;
        match coerce_cell(cell) {
            Coerced::Value(value) => Some(truncate_to_yen(value)).filter(|amount| *amount != 0),
            Coerced::Blank => None,
            Coerced::Invalid => {
                warnings.push(self.warning(FieldKey::Amount, cell));
                None
            }
        }
    }

    fn warning(&self, field: FieldKey, cell: &CellValue) -> ParseWarning {
        ParseWarning {
            row: self.display_row,
            field,
            value: cell.to_text(),
        }
    }
}

/// Free-form edits to a preview row before the import is confirmed.
pub trait PreviewEdit {
    /// Replaces one field with user-typed text.
    ///
    /// Numeric fields keep the text as typed. Editing `quantity` or
    /// `unit_price` recomputes `amount`; an unreadable `amount` edit also
    /// falls back to the computed value.
    fn set_field(&mut self, field: FieldKey, text: &str);

    /// `floor(quantity × unit_price)` from the current display strings.
    fn computed_amount(&self) -> u64;
}

impl PreviewEdit for PreviewItem {
    fn set_field(&mut self, field: FieldKey, text: &str) {
        match field {
            FieldKey::Category => self.category = text.to_string(),
            FieldKey::Name => self.name = text.to_string(),
            FieldKey::Specification => self.specification = text.to_string(),
            FieldKey::Unit => self.unit = Unit::parse_or_default(text),
            FieldKey::Quantity => {
                self.quantity = text.to_string();
                self.amount = self.computed_amount();
            }
            FieldKey::UnitPrice => {
                self.unit_price = text.to_string();
                self.amount = self.computed_amount();
            }
            FieldKey::CostPrice => self.cost_price = text.to_string(),
            FieldKey::Amount => {
                self.amount = parse_numeric(text)
                    .map(truncate_to_yen)
                    .unwrap_or_else(|| self.computed_amount());
            }
        }
    }

    fn computed_amount(&self) -> u64 {
        let quantity = parse_numeric(&self.quantity).unwrap_or(0.0);
        let unit_price = truncate_to_yen(parse_numeric(&self.unit_price).unwrap_or(0.0));
        line_amount(quantity, unit_price)
    }
}
