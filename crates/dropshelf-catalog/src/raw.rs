//! Input record shape for the sheet export.
//!
//! ## Observed shape of the "Shopify product import" sheet
//!
//! One row per variant/image pairing, keyed by column header. Rows for the
//! same product repeat the `Handle`; the product-level columns (`Title`,
//! `Body (HTML)`, `Type`, ...) are usually only filled on the first of them.
//!
//! ### Inventory
//! Two columns carry the same quantity: `Variant Inventory Qty` (text) and
//! `Variant Inventory Quantity` (number). Either may be blank. The text
//! column wins whenever it holds an integer; see
//! [`crate::normalize::parse_inventory_quantity`].
//!
//! ### `Drop #`
//! Absent, blank, or a drop number delivered as text (`"2"`) or as a number
//! (`2`). Kept as-is until the drop index is derived.

use dropshelf_core::CellValue;
use serde::{Deserialize, Serialize};

/// One row of the sheet, keyed by its column headers.
///
/// Every field is optional: blank cells arrive as `null` and columns may be
/// missing entirely. Columns not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRow {
    /// Identity key shared by every row of one product.
    #[serde(rename = "Handle")]
    pub handle: Option<CellValue>,

    #[serde(rename = "Title")]
    pub title: Option<CellValue>,

    /// Product description as HTML markup.
    #[serde(rename = "Body (HTML)")]
    pub body_html: Option<CellValue>,

    /// Product category, e.g. `"Hoodie"`.
    #[serde(rename = "Type")]
    pub product_type: Option<CellValue>,

    #[serde(rename = "Tags")]
    pub tags: Option<CellValue>,

    #[serde(rename = "Image Src")]
    pub image_src: Option<CellValue>,

    #[serde(rename = "Variant SKU")]
    pub variant_sku: Option<CellValue>,

    /// Size.
    #[serde(rename = "Option1 Value")]
    pub option1_value: Option<CellValue>,

    /// Colour.
    #[serde(rename = "Option2 Value")]
    pub option2_value: Option<CellValue>,

    #[serde(rename = "Variant Inventory Qty")]
    pub inventory_qty: Option<CellValue>,

    #[serde(rename = "Variant Inventory Quantity")]
    pub inventory_quantity: Option<CellValue>,

    #[serde(rename = "Variant Price")]
    pub variant_price: Option<CellValue>,

    #[serde(rename = "Drop #")]
    pub drop_number: Option<CellValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_header_keyed_object() {
        let row: RawRow = serde_json::from_value(serde_json::json!({
            "Handle": "boxy-tee",
            "Title": "Boxy Tee",
            "Variant SKU": "BT-S-BLK",
            "Variant Inventory Quantity": 4,
            "Drop #": null,
            "Unrelated Column": "ignored"
        }))
        .expect("row should deserialize");

        assert_eq!(row.handle, Some(CellValue::from("boxy-tee")));
        assert_eq!(row.title, Some(CellValue::from("Boxy Tee")));
        assert_eq!(row.variant_sku, Some(CellValue::from("BT-S-BLK")));
        assert_eq!(row.inventory_quantity, Some(CellValue::Number(4.0)));
        assert_eq!(row.drop_number, None);
        assert_eq!(row.image_src, None);
    }

    #[test]
    fn empty_object_is_an_all_none_row() {
        let row: RawRow = serde_json::from_str("{}").expect("row should deserialize");
        assert_eq!(row, RawRow::default());
    }
}
