//! Numeric coercion for quantity and price cells.
//!
//! Bills of quantities come from many hands: thousands separators, full-width
//! digits typed with a Japanese IME and stray spaces are all common.

use boq_model::CellValue;

/// Result of coercing one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Empty cell or nothing but separators. Silently zero.
    Blank,
    Value(f64),
    /// Non-blank and not a finite, non-negative number.
    Invalid,
}

impl Coerced {
    /// The value, with blank and invalid cells read as zero.
    pub fn or_zero(self) -> f64 {
        match self {
            Self::Value(value) => value,
            Self::Blank | Self::Invalid => 0.0,
        }
    }
}

/// Strips separators and whitespace and folds full-width digits and the
/// full-width decimal point to ASCII.
pub fn clean_numeric_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '，'))
        .map(|c| match c {
            '０'..='９' => char::from_u32(u32::from(c) - 0xFF10 + u32::from('0')).unwrap_or(c),
            '．' => '.',
            _ => c,
        })
        .collect()
}

/// Parses a quantity or price. Only finite, non-negative numbers are
/// accepted.
pub fn parse_numeric(value: &str) -> Option<f64> {
    match coerce_text(value) {
        Coerced::Value(number) => Some(number),
        Coerced::Blank | Coerced::Invalid => None,
    }
}

/// Coerces free text.
pub fn coerce_text(value: &str) -> Coerced {
    let cleaned = clean_numeric_text(value);
    if cleaned.is_empty() {
        return Coerced::Blank;
    }
    cleaned
        .parse::<f64>()
        .map_or(Coerced::Invalid, checked)
}

/// Coerces a raw cell. Numeric cells skip text cleaning.
pub fn coerce_cell(cell: &CellValue) -> Coerced {
    match cell {
        CellValue::Empty => Coerced::Blank,
        CellValue::Number(number) => checked(*number),
        CellValue::Text(text) => coerce_text(text),
    }
}

/// Truncates toward zero into a money amount.
pub fn truncate_to_yen(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

fn checked(number: f64) -> Coerced {
    if number.is_finite() && number >= 0.0 {
        Coerced::Value(number)
    } else {
        Coerced::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_numeric("100"), Some(100.0));
        assert_eq!(parse_numeric("1.5"), Some(1.5));
        assert_eq!(parse_numeric("  12  "), Some(12.0));
    }

    #[test]
    fn test_separators_are_stripped() {
        assert_eq!(parse_numeric("1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_numeric("12，000"), Some(12_000.0));
        assert_eq!(parse_numeric("1\u{a0}000"), Some(1000.0));
    }

    #[test]
    fn test_full_width_digits_fold() {
        assert_eq!(clean_numeric_text("１２．５"), "12.5");
        assert_eq!(parse_numeric("１，０００"), Some(1000.0));
    }

    #[test]
    fn test_blank_and_invalid() {
        assert_eq!(coerce_text(""), Coerced::Blank);
        assert_eq!(coerce_text(" , "), Coerced::Blank);
        assert_eq!(coerce_text("abc"), Coerced::Invalid);
        assert_eq!(coerce_text("12.34.56"), Coerced::Invalid);
        assert_eq!(coerce_text("-5"), Coerced::Invalid);
        assert_eq!(coerce_text("inf"), Coerced::Invalid);
        assert_eq!(coerce_text("NaN"), Coerced::Invalid);
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(coerce_cell(&CellValue::Number(3.0)), Coerced::Value(3.0));
        assert_eq!(coerce_cell(&CellValue::Number(-1.0)), Coerced::Invalid);
        assert_eq!(coerce_cell(&CellValue::Empty), Coerced::Blank);
        assert_eq!(Coerced::Invalid.or_zero(), 0.0);
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_to_yen(500.9), 500);
        assert_eq!(truncate_to_yen(0.0), 0);
        assert_eq!(truncate_to_yen(f64::NAN), 0);
    }
}
