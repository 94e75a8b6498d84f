//! Error types for committing an import.

use boq_model::FieldKey;
use thiserror::Error;

/// Errors from merging preview items into a quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// Mandatory fields have no column. Nothing was merged.
    #[error("required fields are not mapped: {}", field_labels(missing))]
    IncompleteMapping { missing: Vec<FieldKey> },
}

fn field_labels(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .copied()
        .map(FieldKey::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for commit operations.
pub type Result<T> = std::result::Result<T, CommitError>;
