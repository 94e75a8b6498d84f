//! Turning raw data rows into quote line items.
//!
//! - [`normalize`]: data rows + column map to preview items and warnings
//! - [`PreviewEdit`]: user edits to preview rows
//! - [`commit`]: merge preview items into the existing item list

mod error;
mod merge;
mod normalize;
pub mod numeric;

// === Normalization ===
pub use normalize::{NormalizedRows, PreviewEdit, normalize};

// === Merge ===
pub use merge::{MergeMode, commit, to_quote_item};

// === Error Types ===
pub use error::{CommitError, Result};
