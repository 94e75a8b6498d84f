use thiserror::Error;

/// Errors raised by model-level parsing and quote list edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("row {index} out of range (list has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("a quote needs at least one line item")]
    LastRowRequired,
}

pub type Result<T> = std::result::Result<T, ModelError>;
