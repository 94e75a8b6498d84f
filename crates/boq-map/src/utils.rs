//! Column reference helpers.

use crate::error::{MappingError, Result};

/// Spreadsheet-style letters for a zero-based column index (0 -> `A`,
/// 26 -> `AA`).
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parses a column reference: a zero-based number (`2`) or letters (`C`,
/// case-insensitive).
pub fn parse_column_ref(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MappingError::InvalidColumn(raw.to_string()));
    }
    if let Ok(index) = trimmed.parse::<usize>() {
        return Ok(index);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) || trimmed.len() > 3 {
        return Err(MappingError::InvalidColumn(raw.to_string()));
    }
    let number = trimmed
        .bytes()
        .map(|b| usize::from(b.to_ascii_uppercase() - b'A') + 1)
        .fold(0usize, |acc, digit| acc * 26 + digit);
    Ok(number - 1)
}
