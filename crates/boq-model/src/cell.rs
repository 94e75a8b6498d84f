//! Raw spreadsheet cells and grids.
//!
//! A [`RawGrid`] is the untyped rows-and-columns view of an uploaded
//! spreadsheet's first sheet. Cells keep whatever the decoder produced; no
//! coercion happens here.

use serde::{Deserialize, Serialize};

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    /// Literal text as stored in the sheet.
    Text(String),
    /// A numeric cell (dates arrive as their serial number).
    Number(f64),
    /// No value.
    #[default]
    Empty,
}

impl CellValue {
    /// Builds a text cell, mapping an empty string to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// Returns true for `Empty` and for text that is only whitespace.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Renders the cell as text. Integral numbers render without a fraction.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::Empty => String::new(),
        }
    }

    /// Returns the borrowed text of a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats a number the way a spreadsheet shows it in a general cell.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

/// One row of raw cells.
pub type RawRow = Vec<CellValue>;

/// Rows of raw cells decoded from the first sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawGrid {
    rows: Vec<RawRow>,
}

impl RawGrid {
    /// Wraps decoded rows.
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Builds a grid of text cells, mostly useful in tests and fixtures.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| CellValue::text(c.as_ref())).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns the cell at `(row, column)`, or `None` past the row's end.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}
