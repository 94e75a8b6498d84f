//! Entry points: source bytes in, raw grid out.

use std::path::Path;

use boq_model::RawGrid;

use crate::delimited::decode_csv;
use crate::error::{IngestError, Result};
use crate::format::{SpreadsheetFormat, detect_format};
use crate::source::SpreadsheetSource;
use crate::workbook::decode_workbook;

/// Maximum upload size accepted by default (50 MB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Limits applied while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub max_file_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

/// Reads the first sheet of `source` with default limits.
pub fn read_grid(source: &SpreadsheetSource) -> Result<RawGrid> {
    read_grid_with_options(source, &ReadOptions::default())
}

/// Reads the first sheet of `source`.
///
/// Fails with [`IngestError::UnsupportedFormat`] before decoding anything when
/// the source is not recognizably a spreadsheet.
pub fn read_grid_with_options(source: &SpreadsheetSource, options: &ReadOptions) -> Result<RawGrid> {
    if source.len() > options.max_file_size {
        return Err(IngestError::FileTooLarge {
            file: source.file_name().to_string(),
            size: source.len(),
            max_size: options.max_file_size,
        });
    }

    let format = detect_format(source)?;
    let grid = match format {
        SpreadsheetFormat::Xlsx | SpreadsheetFormat::Xls => {
            decode_workbook(source.file_name(), format, source.bytes())?
        }
        SpreadsheetFormat::Csv => decode_csv(source.file_name(), source.bytes())?,
    };

    tracing::debug!(
        file = %source.file_name(),
        %format,
        rows = grid.len(),
        columns = grid.column_count(),
        "decoded spreadsheet"
    );
    Ok(grid)
}

/// Loads `path` from disk and reads its first sheet.
pub fn read_grid_from_path(path: &Path, options: &ReadOptions) -> Result<RawGrid> {
    let source = SpreadsheetSource::from_path(path, options.max_file_size)?;
    read_grid_with_options(&source, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boq_model::CellValue;

    #[test]
    fn test_read_csv_source() {
        let source = SpreadsheetSource::from_bytes(
            "quote.csv",
            Some("text/csv".to_string()),
            "品名,数量,単価\n配線工事,100,500\n".as_bytes().to_vec(),
        );
        let grid = read_grid(&source).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid.cell(1, 0),
            Some(&CellValue::Text("配線工事".to_string()))
        );
    }

    #[test]
    fn test_size_limit_applies_to_uploads() {
        let source = SpreadsheetSource::from_bytes("big.csv", None, vec![b'a'; 16]);
        let options = ReadOptions { max_file_size: 8 };
        assert!(matches!(
            read_grid_with_options(&source, &options),
            Err(IngestError::FileTooLarge { size: 16, .. })
        ));
    }
}
