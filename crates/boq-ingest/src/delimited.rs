//! CSV decoding.

use std::borrow::Cow;

use boq_model::{CellValue, RawGrid};

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Decodes CSV bytes into a grid of text cells.
///
/// Rows may have different lengths. Cells are never converted to numbers;
/// the normalizer coerces them later.
pub fn decode_csv(file: &str, bytes: &[u8]) -> Result<RawGrid> {
    let text = decode_text(file, bytes)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(CellValue::from).collect());
    }
    Ok(RawGrid::new(rows))
}

/// UTF-8 (with or without BOM) first, then Shift_JIS, which is what
/// spreadsheet software on Japanese Windows writes by default.
fn decode_text<'a>(file: &str, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            file: file.to_string(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            file: file.to_string(),
            encoding: "UTF-16 BE",
        });
    }

    let bytes = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(IngestError::unsupported(
            file,
            "text is neither UTF-8 nor Shift_JIS",
        ));
    }
    tracing::debug!(file, "decoded CSV as Shift_JIS");
    Ok(text)
}
