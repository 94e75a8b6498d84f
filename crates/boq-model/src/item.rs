//! Preview and committed quote line items.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;
use crate::unit::Unit;

/// `floor(quantity × unit_price)`, never negative.
pub fn line_amount(quantity: f64, unit_price: u64) -> u64 {
    let amount = (quantity * unit_price as f64).floor();
    if amount.is_finite() && amount > 0.0 {
        amount as u64
    } else {
        0
    }
}

/// A normalized, not yet committed line item.
///
/// Numeric inputs stay display strings so the user can edit them freely
/// before confirming; they are converted when the import is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub seq: usize,
    pub category: String,
    pub name: String,
    pub specification: String,
    pub quantity: String,
    pub unit: Unit,
    pub unit_price: String,
    pub cost_price: String,
    pub amount: u64,
}

/// A committed line item in a quote's item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub seq: usize,
    #[serde(default)]
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub specification: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    pub unit_price: u64,
    #[serde(default)]
    pub cost_price: u64,
    pub amount: u64,
}

impl QuoteItem {
    /// A blank row as the quote form creates it.
    pub fn empty(seq: usize) -> Self {
        Self {
            seq,
            category: String::new(),
            name: String::new(),
            specification: String::new(),
            quantity: 0.0,
            unit: Unit::Lot,
            unit_price: 0,
            cost_price: 0,
            amount: 0,
        }
    }

    pub fn recompute_amount(&mut self) {
        self.amount = line_amount(self.quantity, self.unit_price);
    }
}

/// A numeric cell that could not be read and was imported as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based spreadsheet row number.
    pub row: usize,
    pub field: FieldKey,
    /// The cell text as found in the sheet.
    pub value: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} value \"{}\" is not a number, imported as 0",
            self.row, self.field, self.value
        )
    }
}
