//! The host quote's committed item list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::item::QuoteItem;

/// Consumption tax applied on top of the subtotal, in percent.
pub const TAX_RATE_PERCENT: u64 = 10;

/// Maximum length of a line item name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Ordered quote line items with contiguous `seq` values.
///
/// Every structural change (push, remove, extend, replace) renumbers the
/// items so `seq` is always `0..len`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteItemList {
    items: Vec<QuoteItem>,
}

impl QuoteItemList {
    pub fn new(items: Vec<QuoteItem>) -> Self {
        let mut list = Self { items };
        list.renumber();
        list
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<QuoteItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuoteItem> {
        self.items.get(index)
    }

    /// Appends a blank row.
    pub fn push_empty(&mut self) {
        self.items.push(QuoteItem::empty(self.items.len()));
    }

    pub fn push(&mut self, item: QuoteItem) {
        self.items.push(item);
        self.renumber();
    }

    /// Appends `items` after the existing rows.
    pub fn extend(&mut self, items: impl IntoIterator<Item = QuoteItem>) {
        self.items.extend(items);
        self.renumber();
    }

    /// Discards every existing row in favour of `items`.
    pub fn replace(&mut self, items: impl IntoIterator<Item = QuoteItem>) {
        self.items = items.into_iter().collect();
        self.renumber();
    }

    /// Removes a row. The last remaining row cannot be removed.
    pub fn remove(&mut self, index: usize) -> Result<QuoteItem> {
        self.check_index(index)?;
        if self.items.len() == 1 {
            return Err(ModelError::LastRowRequired);
        }
        let removed = self.items.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Sets the quantity of a row and recomputes its amount.
    pub fn set_quantity(&mut self, index: usize, quantity: f64) -> Result<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.quantity = quantity;
        item.recompute_amount();
        Ok(())
    }

    /// Sets the unit price of a row and recomputes its amount.
    pub fn set_unit_price(&mut self, index: usize, unit_price: u64) -> Result<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.unit_price = unit_price;
        item.recompute_amount();
        Ok(())
    }

    /// Edits a row in place. `seq` is restored afterwards; `amount` is left
    /// as the closure set it.
    pub fn update(&mut self, index: usize, edit: impl FnOnce(&mut QuoteItem)) -> Result<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        edit(item);
        item.seq = index;
        Ok(())
    }

    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals::from_amounts(self.items.iter().map(|item| item.amount))
    }

    /// Checks the list the way the quote form does before submission.
    ///
    /// Rows without a name are ignored.
    pub fn validate(&self) -> Vec<ItemIssue> {
        let named: Vec<&QuoteItem> = self
            .items
            .iter()
            .filter(|item| !item.name.trim().is_empty())
            .collect();
        if named.is_empty() {
            return vec![ItemIssue::NoItems];
        }
        let mut issues = Vec::new();
        for item in named {
            if item.name.chars().count() > MAX_NAME_CHARS {
                issues.push(ItemIssue::NameTooLong { seq: item.seq });
            }
            if item.quantity.is_nan() || item.quantity <= 0.0 {
                issues.push(ItemIssue::QuantityNotPositive { seq: item.seq });
            }
        }
        issues
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(ModelError::RowOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (seq, item) in self.items.iter_mut().enumerate() {
            item.seq = seq;
        }
    }
}

impl From<Vec<QuoteItem>> for QuoteItemList {
    fn from(items: Vec<QuoteItem>) -> Self {
        Self::new(items)
    }
}

/// Quote totals in yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,
}

impl QuoteTotals {
    /// Sums `amounts` and adds floored tax. Sums past `u64::MAX` saturate.
    pub fn from_amounts(amounts: impl IntoIterator<Item = u64>) -> Self {
        let subtotal = amounts.into_iter().fold(0_u64, u64::saturating_add);
        let tax = u128::from(subtotal) * u128::from(TAX_RATE_PERCENT) / 100;
        let tax = u64::try_from(tax).unwrap_or(u64::MAX);
        Self {
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
        }
    }
}

/// A problem that blocks submitting a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemIssue {
    /// No row has a name.
    NoItems,
    NameTooLong { seq: usize },
    QuantityNotPositive { seq: usize },
}

impl fmt::Display for ItemIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => f.write_str("at least one named line item is required"),
            Self::NameTooLong { seq } => {
                write!(f, "item {seq}: name exceeds {MAX_NAME_CHARS} characters")
            }
            Self::QuantityNotPositive { seq } => {
                write!(f, "item {seq}: quantity must be greater than 0")
            }
        }
    }
}
