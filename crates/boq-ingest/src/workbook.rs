//! Excel workbook decoding via calamine.

use std::fmt;
use std::io::Cursor;

use calamine::{Data, Reader, Xls, Xlsx, open_workbook_from_rs};

use boq_model::{CellValue, RawGrid, RawRow};

use crate::error::{IngestError, Result};
use crate::format::SpreadsheetFormat;

/// Decodes the first sheet of an `.xlsx`/`.xls` workbook.
///
/// The workbook is opened with the reader for `format` only, so other
/// containers (ODS, xlsb) are rejected as unsupported. Cells are taken as
/// calamine typed them. Leading rows and columns outside the sheet's used
/// range are padded with empty cells so column indices match the
/// spreadsheet's own columns.
pub fn decode_workbook(file: &str, format: SpreadsheetFormat, bytes: &[u8]) -> Result<RawGrid> {
    let cursor = Cursor::new(bytes);
    match format {
        SpreadsheetFormat::Xlsx => first_sheet(file, open_workbook_from_rs::<Xlsx<_>, _>(cursor)),
        SpreadsheetFormat::Xls => first_sheet(file, open_workbook_from_rs::<Xls<_>, _>(cursor)),
        SpreadsheetFormat::Csv => Err(IngestError::unsupported(file, "not a workbook")),
    }
}

type WorkbookBytes<'a> = Cursor<&'a [u8]>;

fn first_sheet<'a, R>(
    file: &str,
    opened: std::result::Result<R, <R as Reader<WorkbookBytes<'a>>>::Error>,
) -> Result<RawGrid>
where
    R: Reader<WorkbookBytes<'a>>,
    <R as Reader<WorkbookBytes<'a>>>::Error: fmt::Display,
{
    let mut workbook = opened
        .map_err(|e| IngestError::unsupported(file, format!("failed to open workbook: {e}")))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(IngestError::unsupported(
                file,
                format!("failed to read first sheet: {e}"),
            ));
        }
        None => {
            return Err(IngestError::EmptyWorkbook {
                file: file.to_string(),
            });
        }
    };

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<RawRow> = Vec::with_capacity(start_row as usize + range.height());
    rows.resize_with(start_row as usize, Vec::new);

    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(cell_value));
        rows.push(cells);
    }

    Ok(RawGrid::new(rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(format!("#{e:?}")),
    }
}
