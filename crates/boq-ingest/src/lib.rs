//! Spreadsheet intake for quote imports.
//!
//! This crate turns an uploaded file into a [`RawGrid`](boq_model::RawGrid):
//!
//! - **Format detection**: content type, extension and magic bytes
//! - **Workbook decoding**: first sheet of `.xlsx`/`.xls` via calamine
//! - **CSV decoding**: UTF-8 or Shift_JIS text, ragged rows allowed
//! - **Template**: the `.xlsx` users can fill in and upload
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use boq_ingest::{ReadOptions, read_grid_from_path};
//!
//! let grid = read_grid_from_path(Path::new("見積明細.xlsx"), &ReadOptions::default())?;
//! println!("{} rows", grid.len());
//! ```

mod delimited;
mod error;
mod format;
mod reader;
mod source;
mod template;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use format::{SpreadsheetFormat, detect_format};
pub use reader::{MAX_FILE_SIZE, ReadOptions, read_grid, read_grid_from_path, read_grid_with_options};
pub use source::SpreadsheetSource;

// === Template ===
pub use template::{TEMPLATE_SHEET_NAME, build_template, template_bytes, template_header, write_template};
