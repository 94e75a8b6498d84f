//! Data model for importing bill-of-quantities spreadsheets into a quote.
//!
//! - [`CellValue`] / [`RawGrid`]: raw decoded sheet contents
//! - [`FieldKey`] / [`ColumnMap`]: which column feeds which line-item field
//! - [`PreviewItem`] / [`ParseWarning`]: normalized rows awaiting confirmation
//! - [`QuoteItem`] / [`QuoteItemList`]: the committed item list and its totals

pub mod cell;
pub mod error;
pub mod field;
pub mod item;
pub mod mapping;
pub mod quote;
pub mod unit;

pub use cell::{CellValue, RawGrid, RawRow, format_number};
pub use error::{ModelError, Result};
pub use field::FieldKey;
pub use item::{ParseWarning, PreviewItem, QuoteItem, line_amount};
pub use mapping::ColumnMap;
pub use quote::{ItemIssue, MAX_NAME_CHARS, QuoteItemList, QuoteTotals, TAX_RATE_PERCENT};
pub use unit::Unit;
