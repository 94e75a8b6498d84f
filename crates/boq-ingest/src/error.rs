//! Error types for spreadsheet intake.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an uploaded spreadsheet.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Format Errors ===
    /// Not a spreadsheet, or a spreadsheet the decoder could not open.
    #[error("unsupported format for {file}: {reason}")]
    UnsupportedFormat { file: String, reason: String },

    /// Text encoding that cannot be decoded (UTF-16 CSV).
    #[error("unsupported encoding {encoding} in {file}")]
    UnsupportedEncoding {
        file: String,
        encoding: &'static str,
    },

    /// Workbook decoded but has no sheets.
    #[error("workbook has no sheets: {file}")]
    EmptyWorkbook { file: String },

    /// CSV text could not be split into records.
    #[error("failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file too large: {file} is {size} bytes (max {max_size})")]
    FileTooLarge {
        file: String,
        size: u64,
        max_size: u64,
    },

    // === Template Errors ===
    /// Failed to build or save the import template.
    #[error("failed to write template: {message}")]
    TemplateWrite { message: String },
}

impl IngestError {
    pub(crate) fn unsupported(file: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for IngestError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::TemplateWrite {
            message: err.to_string(),
        }
    }
}

/// Result type for intake operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::unsupported("photo.png", "not a spreadsheet");
        assert_eq!(
            err.to_string(),
            "unsupported format for photo.png: not a spreadsheet"
        );
    }

    #[test]
    fn test_file_not_found_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/quote.xlsx"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/quote.xlsx");
    }
}
