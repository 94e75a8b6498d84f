//! Mapping state for interactive column assignment.
//!
//! Fields recognized from the header row start out locked so a stray click
//! cannot undo a correct detection; the user unlocks a field to edit it.

use std::collections::BTreeSet;
use std::fmt;

use boq_model::{ColumnMap, FieldKey};

use crate::detect::HeaderDetection;
use crate::error::{MappingError, Result};
use crate::utils::column_letter;

/// A selectable source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOption {
    pub index: usize,
    pub letter: String,
    /// Header text, empty when the header cell was blank.
    pub label: String,
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.letter)
        } else {
            write!(f, "{}: {}", self.letter, self.label)
        }
    }
}

/// Status of a field's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMappingStatus {
    /// Recognized from the header row and still locked.
    Detected,
    /// Assigned by the user, by the positional fallback, or unlocked.
    Assigned,
    Unmapped,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    pub total_fields: usize,
    pub mapped: usize,
    pub detected: usize,
    pub required_total: usize,
    pub required_mapped: usize,
}

impl MappingSummary {
    /// True when every mandatory field has a column.
    pub fn is_complete(&self) -> bool {
        self.required_mapped == self.required_total
    }
}

/// Editable column mapping for one import.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingState {
    column_map: ColumnMap,
    locked: BTreeSet<FieldKey>,
    columns: Vec<ColumnOption>,
}

impl MappingState {
    /// Builds the state from explicit parts. `header_labels` may be shorter
    /// than `column_count`.
    pub fn new(
        column_map: ColumnMap,
        locked: BTreeSet<FieldKey>,
        header_labels: &[String],
        column_count: usize,
    ) -> Self {
        let width = column_count.max(header_labels.len());
        let columns = (0..width)
            .map(|index| ColumnOption {
                index,
                letter: column_letter(index),
                label: header_labels.get(index).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            column_map,
            locked,
            columns,
        }
    }

    /// Initial state after header detection.
    pub fn from_detection(detection: &HeaderDetection) -> Self {
        Self::new(
            detection.column_map.clone(),
            detection.auto_detected.clone(),
            &detection.header_labels,
            detection.column_count,
        )
    }

    pub fn column_map(&self) -> &ColumnMap {
        &self.column_map
    }

    pub fn columns(&self) -> &[ColumnOption] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnOption> {
        self.columns.get(index)
    }

    pub fn is_locked(&self, field: FieldKey) -> bool {
        self.locked.contains(&field)
    }

    pub fn locked_fields(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.locked.iter().copied()
    }

    pub fn field_status(&self, field: FieldKey) -> FieldMappingStatus {
        if !self.column_map.contains(field) {
            FieldMappingStatus::Unmapped
        } else if self.is_locked(field) {
            FieldMappingStatus::Detected
        } else {
            FieldMappingStatus::Assigned
        }
    }

    /// Points `field` at `column`. A column may feed several fields.
    pub fn assign(&mut self, field: FieldKey, column: usize) -> Result<()> {
        self.ensure_unlocked(field)?;
        if column >= self.columns.len() {
            return Err(MappingError::ColumnOutOfRange {
                column,
                column_count: self.columns.len(),
            });
        }
        self.column_map.assign(field, column);
        Ok(())
    }

    /// Removes the mapping for `field`. Returns whether a mapping existed.
    pub fn clear(&mut self, field: FieldKey) -> Result<bool> {
        self.ensure_unlocked(field)?;
        Ok(self.column_map.clear(field).is_some())
    }

    /// Makes a detected field editable. Returns whether it was locked.
    pub fn unlock(&mut self, field: FieldKey) -> bool {
        self.locked.remove(&field)
    }

    pub fn missing_mandatory(&self) -> Vec<FieldKey> {
        self.column_map.missing_mandatory()
    }

    pub fn summary(&self) -> MappingSummary {
        let required_mapped = FieldKey::MANDATORY
            .iter()
            .filter(|field| self.column_map.contains(**field))
            .count();
        MappingSummary {
            total_fields: FieldKey::ALL.len(),
            mapped: self.column_map.len(),
            detected: self.locked.len(),
            required_total: FieldKey::MANDATORY.len(),
            required_mapped,
        }
    }

    fn ensure_unlocked(&self, field: FieldKey) -> Result<()> {
        if self.is_locked(field) {
            Err(MappingError::FieldLocked(field))
        } else {
            Ok(())
        }
    }
}
