//! Projection from a loosely-typed [`RawRow`] to a [`NormalizedRow`].
//!
//! Nothing here fails except a missing handle. Absent or unparseable optional
//! fields resolve to defined defaults instead of errors.

use dropshelf_core::{CellValue, Variant};

use crate::error::CatalogError;
use crate::raw::RawRow;

/// The per-row projection consumed by [`crate::aggregate::CatalogBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub handle: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub price: Option<String>,
    /// Present only when the row's image reference is non-empty.
    pub image: Option<String>,
    /// Present only when the row carries a non-empty SKU.
    pub variant: Option<Variant>,
    /// Passed through untouched; drop classification happens at aggregation.
    pub drop_number: Option<CellValue>,
}

/// Normalizes one sheet row.
///
/// # Errors
///
/// Returns [`CatalogError::MissingHandle`] if the row has no handle, or only
/// whitespace where the handle should be.
pub fn normalize_row(row: RawRow) -> Result<NormalizedRow, CatalogError> {
    let handle = cell_text(row.handle)
        .filter(|h| !h.trim().is_empty())
        .ok_or(CatalogError::MissingHandle)?;

    let variant = cell_text(row.variant_sku).map(|sku| Variant {
        sku,
        option1: cell_text(row.option1_value).unwrap_or_default(),
        option2: cell_text(row.option2_value).unwrap_or_default(),
        inventory_quantity: parse_inventory_quantity(
            row.inventory_qty.as_ref(),
            row.inventory_quantity.as_ref(),
        ),
    });

    Ok(NormalizedRow {
        handle,
        title: cell_text(row.title),
        description: cell_text(row.body_html),
        category: cell_text(row.product_type),
        tags: cell_text(row.tags),
        price: cell_text(row.variant_price),
        image: cell_text(row.image_src),
        variant,
        drop_number: row.drop_number,
    })
}

/// Resolves a variant's inventory from the sheet's two quantity columns.
///
/// Order matters: the text column (`Variant Inventory Qty`) wins whenever it
/// starts with an integer. Otherwise the numeric column (`Variant Inventory
/// Quantity`) is used, truncated toward zero. If neither yields a number the
/// quantity is `0`.
#[must_use]
pub fn parse_inventory_quantity(text: Option<&CellValue>, number: Option<&CellValue>) -> i64 {
    text.and_then(|cell| parse_int_prefix(&cell.to_string()))
        .or_else(|| number.and_then(CellValue::as_number).map(truncate_to_i64))
        .unwrap_or(0)
}

/// Reads the leading integer of `input`: optional leading whitespace, an
/// optional sign, then a run of ASCII digits. Trailing text is ignored, so
/// `"3.9"` is `3` and `"12 pcs"` is `12`. Saturates instead of overflowing.
///
/// Returns `None` when no digit follows the optional sign.
pub(crate) fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = rest.as_bytes()[..digit_count]
        .iter()
        .fold(0i64, |acc, &b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    Some(if negative { -magnitude } else { magnitude })
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_to_i64(value: f64) -> i64 {
    // `as` saturates at the i64 bounds.
    value.trunc() as i64
}

/// Stringifies a cell, treating the empty string as absent.
fn cell_text(cell: Option<CellValue>) -> Option<String> {
    cell.map(|value| match value {
        CellValue::Text(s) => s,
        number @ CellValue::Number(_) => number.to_string(),
    })
    .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
