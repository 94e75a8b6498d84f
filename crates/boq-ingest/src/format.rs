//! Spreadsheet format detection from content type, extension and magic bytes.

use std::fmt;

use crate::error::{IngestError, Result};
use crate::source::SpreadsheetSource;

/// ZIP local file header, the container of every `.xlsx`.
const ZIP_SIGNATURE: [u8; 4] = *b"PK\x03\x04";

/// OLE compound file header, the container of legacy `.xls`.
const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Spreadsheet formats accepted for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SpreadsheetFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Csv => "csv",
        }
    }

    pub fn from_extension(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Xlsx)
            }
            "application/vnd.ms-excel" => Some(Self::Xls),
            "text/csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Binary workbook formats recognizable from their first bytes.
    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&ZIP_SIGNATURE) {
            Some(Self::Xlsx)
        } else if bytes.starts_with(&CFB_SIGNATURE) {
            Some(Self::Xls)
        } else {
            None
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decides how to decode `source`.
///
/// The declared content type is consulted first, then the file extension.
/// A recognizable binary signature overrides both. A declared workbook whose
/// bytes carry no workbook signature is rejected.
pub fn detect_format(source: &SpreadsheetSource) -> Result<SpreadsheetFormat> {
    let sniffed = SpreadsheetFormat::from_signature(source.bytes());
    let declared = source
        .content_type()
        .and_then(SpreadsheetFormat::from_content_type)
        .or_else(|| SpreadsheetFormat::from_extension(source.file_name()));

    match (sniffed, declared) {
        (Some(format), _) => Ok(format),
        (None, Some(SpreadsheetFormat::Csv)) => Ok(SpreadsheetFormat::Csv),
        (None, Some(format)) => Err(IngestError::unsupported(
            source.file_name(),
            format!("declared as .{format} but the content is not a workbook"),
        )),
        (None, None) => Err(IngestError::unsupported(
            source.file_name(),
            "expected an Excel (.xlsx, .xls) or CSV (.csv) file",
        )),
    }
}
