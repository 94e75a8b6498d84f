//! Field-to-column assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldKey;

/// Assignment of line-item fields to zero-based spreadsheet column indices.
///
/// Only assigned fields are present. Clearing a field removes its key, so an
/// unmapped field is always distinguishable from a field mapped to a blank
/// column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap {
    columns: BTreeMap<FieldKey, usize>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional mapping used when no header row can be recognized.
    pub fn positional_fallback() -> Self {
        [
            (FieldKey::Name, 0),
            (FieldKey::Specification, 1),
            (FieldKey::Quantity, 2),
            (FieldKey::Unit, 3),
            (FieldKey::UnitPrice, 4),
            (FieldKey::Amount, 5),
        ]
        .into_iter()
        .collect()
    }

    /// Assigns `field` to `column`, returning the previous column if any.
    pub fn assign(&mut self, field: FieldKey, column: usize) -> Option<usize> {
        self.columns.insert(field, column)
    }

    /// Removes the assignment for `field`.
    pub fn clear(&mut self, field: FieldKey) -> Option<usize> {
        self.columns.remove(&field)
    }

    pub fn get(&self, field: FieldKey) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assigned fields in [`FieldKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, usize)> + '_ {
        self.columns.iter().map(|(field, column)| (*field, *column))
    }

    /// Fields mapped to `column`.
    pub fn fields_for_column(&self, column: usize) -> Vec<FieldKey> {
        self.iter()
            .filter(|(_, c)| *c == column)
            .map(|(field, _)| field)
            .collect()
    }

    /// Mandatory fields that have no assignment.
    pub fn missing_mandatory(&self) -> Vec<FieldKey> {
        FieldKey::MANDATORY
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// True when every mandatory field is assigned.
    pub fn is_complete(&self) -> bool {
        self.missing_mandatory().is_empty()
    }
}

impl FromIterator<(FieldKey, usize)> for ColumnMap {
    fn from_iter<T: IntoIterator<Item = (FieldKey, usize)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_positional() {
        let map = ColumnMap::positional_fallback();
        assert_eq!(map.get(FieldKey::Name), Some(0));
        assert_eq!(map.get(FieldKey::Amount), Some(5));
        assert_eq!(map.get(FieldKey::Category), None);
        assert_eq!(map.get(FieldKey::CostPrice), None);
        assert!(map.is_complete());
    }

    #[test]
    fn clearing_removes_the_key() {
        let mut map = ColumnMap::positional_fallback();
        assert_eq!(map.clear(FieldKey::Quantity), Some(2));
        assert!(!map.contains(FieldKey::Quantity));
        assert_eq!(map.missing_mandatory(), vec![FieldKey::Quantity]);
        assert_eq!(map.clear(FieldKey::Quantity), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let map: ColumnMap = [(FieldKey::Name, 0), (FieldKey::UnitPrice, 2)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"name":0,"unit_price":2}"#);
    }
}
