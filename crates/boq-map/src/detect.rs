//! Header row detection.
//!
//! Bill-of-quantities sheets often carry a title block above the table, so
//! the header is searched for in the first few rows instead of assumed to be
//! row 0.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use boq_model::{CellValue, ColumnMap, FieldKey, RawGrid, RawRow};

use crate::dictionary::HeaderSynonymDictionary;

/// Rows inspected when looking for a header.
pub const HEADER_SCAN_ROWS: usize = 10;

/// Distinct fields a row must yield to count as a header.
pub const MIN_HEADER_MATCHES: usize = 2;

/// Tuning for [`detect_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectOptions {
    pub scan_rows: usize,
    pub min_matches: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            scan_rows: HEADER_SCAN_ROWS,
            min_matches: MIN_HEADER_MATCHES,
        }
    }
}

/// Rows below the header, with the grid index of the first one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataRows {
    rows: Vec<RawRow>,
    first_row_index: usize,
}

impl DataRows {
    pub fn new(rows: Vec<RawRow>, first_row_index: usize) -> Self {
        Self {
            rows,
            first_row_index,
        }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Grid index of `rows()[0]`.
    pub fn first_row_index(&self) -> usize {
        self.first_row_index
    }

    /// One-based row number as shown in a spreadsheet application.
    pub fn display_row(&self, offset: usize) -> usize {
        self.first_row_index + offset + 1
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of header detection over a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDetection {
    pub column_map: ColumnMap,
    /// Fields recognized from header labels. Empty when the positional
    /// fallback was used.
    pub auto_detected: BTreeSet<FieldKey>,
    /// Grid index of the header row (0 for the fallback).
    pub header_row: usize,
    /// Text of every header cell, by column.
    pub header_labels: Vec<String>,
    pub data_rows: DataRows,
    /// Width of the widest row in the grid.
    pub column_count: usize,
}

impl HeaderDetection {
    /// True when no row qualified and positional columns were assumed.
    pub fn is_fallback(&self) -> bool {
        self.auto_detected.is_empty()
    }
}

/// Matches one row's cells against the dictionary.
///
/// Cells are scanned left to right and a field keeps the first column that
/// claims it.
pub fn match_header_row(row: &[CellValue], dictionary: &HeaderSynonymDictionary) -> ColumnMap {
    let mut map = ColumnMap::new();
    for (column, cell) in row.iter().enumerate() {
        let Some(text) = cell.as_text() else {
            continue;
        };
        if let Some(field) = dictionary.lookup(text)
            && !map.contains(field)
        {
            map.assign(field, column);
        }
    }
    map
}

/// Finds the header row and derives the column map. Never fails: grids with
/// no recognizable header get the positional mapping with row 0 as header.
pub fn detect_header(
    grid: &RawGrid,
    dictionary: &HeaderSynonymDictionary,
    options: &DetectOptions,
) -> HeaderDetection {
    let rows = grid.rows();
    let found = rows
        .iter()
        .take(options.scan_rows)
        .enumerate()
        .map(|(index, row)| (index, match_header_row(row, dictionary)))
        .find(|(_, map)| map.len() >= options.min_matches.max(1));

    let (header_row, column_map, auto_detected) = match found {
        Some((index, map)) => {
            let detected = map.iter().map(|(field, _)| field).collect();
            debug!(header_row = index, fields = map.len(), "detected header row");
            (index, map, detected)
        }
        None => {
            debug!(
                scanned = rows.len().min(options.scan_rows),
                "no header row recognized, using positional columns"
            );
            (0, ColumnMap::positional_fallback(), BTreeSet::new())
        }
    };

    let header_labels = rows
        .get(header_row)
        .map(|row| row.iter().map(|cell| cell.to_text().trim().to_string()).collect())
        .unwrap_or_default();
    let data_start = header_row + 1;
    let data_rows = DataRows::new(rows.iter().skip(data_start).cloned().collect(), data_start);

    HeaderDetection {
        column_map,
        auto_detected,
        header_row,
        header_labels,
        data_rows,
        column_count: grid.column_count(),
    }
}
