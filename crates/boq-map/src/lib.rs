//! Header detection and column mapping for quote imports.
//!
//! [`detect_header`] locates the header row of a raw grid using a
//! [`HeaderSynonymDictionary`], and [`MappingState`] lets the user correct the
//! resulting [`ColumnMap`](boq_model::ColumnMap) before rows are normalized.

mod detect;
mod dictionary;
mod error;
mod state;
mod utils;

// === Detection ===
pub use detect::{
    DataRows, DetectOptions, HEADER_SCAN_ROWS, HeaderDetection, MIN_HEADER_MATCHES, detect_header,
    match_header_row,
};
pub use dictionary::{HeaderSynonymDictionary, Synonym, normalize_header};

// === Mapping State ===
pub use state::{ColumnOption, FieldMappingStatus, MappingState, MappingSummary};

// === Utilities ===
pub use utils::{column_letter, parse_column_ref};

// === Error Types ===
pub use error::{MappingError, Result};
