//! Error types for mapping edits.

use boq_model::FieldKey;
use thiserror::Error;

/// Errors from editing a column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column index past the widest row of the sheet.
    #[error("column {column} is out of range (sheet has {column_count} columns)")]
    ColumnOutOfRange { column: usize, column_count: usize },

    /// Field was auto-detected and must be unlocked before editing.
    #[error("{0} was detected from the header row; unlock it before changing it")]
    FieldLocked(FieldKey),

    /// Column reference that is neither a number nor a letter sequence.
    #[error("invalid column reference: {0:?}")]
    InvalidColumn(String),
}

/// Result alias for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
