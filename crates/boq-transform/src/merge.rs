//! Committing preview items into a quote's item list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use boq_model::{ColumnMap, PreviewItem, QuoteItem};

use crate::error::{CommitError, Result};
use crate::numeric::{parse_numeric, truncate_to_yen};

/// How imported rows combine with the rows already in the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Append after the existing rows.
    #[default]
    Add,
    /// Discard the existing rows.
    Replace,
}

impl MergeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
        }
    }

    /// Replacing a non-empty list destroys data and must be confirmed first.
    pub fn requires_confirmation(self, existing_len: usize) -> bool {
        self == Self::Replace && existing_len > 0
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "append" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            other => Err(format!("unknown merge mode: {other}")),
        }
    }
}

/// Converts a preview row. Unreadable numeric text becomes zero.
pub fn to_quote_item(item: &PreviewItem, seq: usize) -> QuoteItem {
    QuoteItem {
        seq,
        category: item.category.clone(),
        name: item.name.clone(),
        specification: item.specification.clone(),
        quantity: parse_numeric(&item.quantity).unwrap_or(0.0),
        unit: item.unit,
        unit_price: truncate_to_yen(parse_numeric(&item.unit_price).unwrap_or(0.0)),
        cost_price: truncate_to_yen(parse_numeric(&item.cost_price).unwrap_or(0.0)),
        amount: item.amount,
    }
}

/// Builds the new item list. `existing` is left untouched; the caller swaps
/// in the returned list.
///
/// Fails with [`CommitError::IncompleteMapping`] when a mandatory field has
/// no column. `seq` runs 0..n over the result.
pub fn commit(
    existing: &[QuoteItem],
    preview: &[PreviewItem],
    mode: MergeMode,
    column_map: &ColumnMap,
) -> Result<Vec<QuoteItem>> {
    let missing = column_map.missing_mandatory();
    if !missing.is_empty() {
        return Err(CommitError::IncompleteMapping { missing });
    }

    let kept: &[QuoteItem] = match mode {
        MergeMode::Add => existing,
        MergeMode::Replace => &[],
    };
    let mut merged: Vec<QuoteItem> = Vec::with_capacity(kept.len() + preview.len());
    merged.extend(kept.iter().cloned());
    merged.extend(
        preview
            .iter()
            .enumerate()
            .map(|(offset, item)| to_quote_item(item, kept.len() + offset)),
    );
    for (seq, item) in merged.iter_mut().enumerate() {
        item.seq = seq;
    }

    info!(
        %mode,
        existing = existing.len(),
        imported = preview.len(),
        total = merged.len(),
        "committed import"
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boq_model::{FieldKey, Unit};

    fn preview(name: &str, quantity: &str, unit_price: &str, amount: u64) -> PreviewItem {
        PreviewItem {
            seq: 0,
            category: String::new(),
            name: name.to_string(),
            specification: String::new(),
            quantity: quantity.to_string(),
            unit: Unit::Lot,
            unit_price: unit_price.to_string(),
            cost_price: "0".to_string(),
            amount,
        }
    }

    #[test]
    fn test_replace_confirmation() {
        assert!(MergeMode::Replace.requires_confirmation(1));
        assert!(!MergeMode::Replace.requires_confirmation(0));
        assert!(!MergeMode::Add.requires_confirmation(5));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Replace".parse::<MergeMode>(), Ok(MergeMode::Replace));
        assert_eq!("add".parse::<MergeMode>(), Ok(MergeMode::Add));
        assert!("merge".parse::<MergeMode>().is_err());
    }

    #[test]
    fn test_conversion_reads_edited_text() {
        let item = to_quote_item(&preview("a", "1,5", "12.9", 7), 3);
        assert_eq!(item.seq, 3);
        assert_eq!(item.quantity, 15.0);
        assert_eq!(item.unit_price, 12);
        assert_eq!(item.amount, 7);

        let broken = to_quote_item(&preview("b", "x", "y", 0), 0);
        assert_eq!(broken.quantity, 0.0);
        assert_eq!(broken.unit_price, 0);
    }

    #[test]
    fn test_incomplete_mapping_leaves_nothing_changed() {
        let existing = vec![QuoteItem::empty(0)];
        let map: ColumnMap = [(FieldKey::Name, 0)].into_iter().collect();
        let err = commit(&existing, &[preview("a", "1", "1", 1)], MergeMode::Add, &map)
            .unwrap_err();
        assert_eq!(
            err,
            CommitError::IncompleteMapping {
                missing: vec![FieldKey::Quantity, FieldKey::UnitPrice]
            }
        );
        assert_eq!(err.to_string(), "required fields are not mapped: 数量, 単価");
    }
}
