//! Logical line-item fields that spreadsheet columns map onto.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A line-item field that a spreadsheet column can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Category,
    Name,
    Specification,
    Quantity,
    Unit,
    UnitPrice,
    CostPrice,
    Amount,
}

impl FieldKey {
    /// All fields in template column order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Category,
        FieldKey::Name,
        FieldKey::Specification,
        FieldKey::Quantity,
        FieldKey::Unit,
        FieldKey::UnitPrice,
        FieldKey::CostPrice,
        FieldKey::Amount,
    ];

    /// Fields that must be mapped before an import can be committed.
    pub const MANDATORY: [FieldKey; 3] = [FieldKey::Name, FieldKey::Quantity, FieldKey::UnitPrice];

    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }

    /// Fields read as numbers by the normalizer.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Quantity | Self::UnitPrice | Self::CostPrice | Self::Amount
        )
    }

    /// Stable snake_case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Name => "name",
            Self::Specification => "specification",
            Self::Quantity => "quantity",
            Self::Unit => "unit",
            Self::UnitPrice => "unit_price",
            Self::CostPrice => "cost_price",
            Self::Amount => "amount",
        }
    }

    /// Column heading used by the import template.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "分類",
            Self::Name => "品名",
            Self::Specification => "仕様",
            Self::Quantity => "数量",
            Self::Unit => "単位",
            Self::UnitPrice => "単価",
            Self::CostPrice => "原価",
            Self::Amount => "金額",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == key || field.label() == s.trim())
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
