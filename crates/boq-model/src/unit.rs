//! Units of measure accepted on a quote line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The fixed set of units a quote line may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// 式, a lump-sum lot. Used whenever a source unit is missing or unknown.
    #[default]
    #[serde(rename = "式")]
    Lot,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "m2")]
    SquareMeter,
    /// 個
    #[serde(rename = "個")]
    Piece,
    /// 台
    #[serde(rename = "台")]
    Machine,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Lot,
        Unit::Meter,
        Unit::SquareMeter,
        Unit::Piece,
        Unit::Machine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lot => "式",
            Self::Meter => "m",
            Self::SquareMeter => "m2",
            Self::Piece => "個",
            Self::Machine => "台",
        }
    }

    /// Exact match against the unit list after trimming.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|unit| unit.as_str() == value)
    }

    /// Parses a unit, substituting the default lot unit for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownUnit(s.to_string()))
    }
}
