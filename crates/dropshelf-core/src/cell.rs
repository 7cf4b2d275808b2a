use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as delivered by the row source.
///
/// Sheet exports are loosely typed: the same column may carry `"3"` on one
/// row and `3` on the next. The untagged representation accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// `true` only for a text cell holding the empty string.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Numeric value of the cell, reading text cells as decimal numbers.
    ///
    /// Returns `None` for text that does not parse and for non-finite values.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for CellValue {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // Integral floats render without a fractional part: 1.0 -> "1".
            CellValue::Number(n) if *n == 0.0 => f.write_str("0"),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}
