use super::*;

// -----------------------------------------------------------------------
// parse_inventory_quantity
// -----------------------------------------------------------------------

fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

#[test]
fn quantity_text_wins_when_parseable() {
    let qty = parse_inventory_quantity(Some(&text("12")), Some(&CellValue::Number(99.0)));
    assert_eq!(qty, 12);
}

#[test]
fn quantity_falls_back_to_number_when_text_empty() {
    let qty = parse_inventory_quantity(Some(&text("")), Some(&CellValue::Number(99.0)));
    assert_eq!(qty, 99);
}

#[test]
fn quantity_falls_back_to_number_when_text_absent() {
    let qty = parse_inventory_quantity(None, Some(&CellValue::Number(7.0)));
    assert_eq!(qty, 7);
}

#[test]
fn quantity_zero_when_both_absent() {
    assert_eq!(parse_inventory_quantity(None, None), 0);
}

#[test]
fn quantity_zero_text_is_still_authoritative() {
    let qty = parse_inventory_quantity(Some(&text("0")), Some(&CellValue::Number(5.0)));
    assert_eq!(qty, 0);
}

#[test]
fn quantity_text_with_trailing_garbage_uses_leading_integer() {
    assert_eq!(parse_inventory_quantity(Some(&text(" 7 pcs")), None), 7);
    assert_eq!(parse_inventory_quantity(Some(&text("3.9")), None), 3);
    assert_eq!(parse_inventory_quantity(Some(&text("-2")), None), -2);
}

#[test]
fn quantity_non_numeric_text_falls_back() {
    let qty = parse_inventory_quantity(Some(&text("n/a")), Some(&text("14")));
    assert_eq!(qty, 14);
}

#[test]
fn quantity_numeric_fallback_truncates() {
    let qty = parse_inventory_quantity(None, Some(&CellValue::Number(4.8)));
    assert_eq!(qty, 4);
}

#[test]
fn quantity_numeric_fallback_rejects_text() {
    assert_eq!(parse_inventory_quantity(None, Some(&text("lots"))), 0);
}

#[test]
fn quantity_number_in_text_column_is_read() {
    let qty = parse_inventory_quantity(Some(&CellValue::Number(21.0)), None);
    assert_eq!(qty, 21);
}

#[test]
fn parse_int_prefix_requires_a_digit() {
    assert_eq!(parse_int_prefix(""), None);
    assert_eq!(parse_int_prefix("-"), None);
    assert_eq!(parse_int_prefix("abc12"), None);
    assert_eq!(parse_int_prefix("+8"), Some(8));
}

#[test]
fn parse_int_prefix_saturates() {
    assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
}

// -----------------------------------------------------------------------
// normalize_row
// -----------------------------------------------------------------------

fn make_row() -> RawRow {
    RawRow {
        handle: Some(text("boxy-tee")),
        title: Some(text("Boxy Tee")),
        body_html: Some(text("<p>Heavyweight.</p>")),
        product_type: Some(text("T-Shirt")),
        tags: Some(text("tee, summer")),
        image_src: Some(text("https://cdn.example.com/boxy-a.jpg")),
        variant_sku: Some(text("BT-S-BLK")),
        option1_value: Some(text("S")),
        option2_value: Some(text("Black")),
        inventory_qty: Some(text("3")),
        inventory_quantity: Some(CellValue::Number(3.0)),
        variant_price: Some(text("45.00")),
        drop_number: Some(text("1")),
    }
}

#[test]
fn normalize_row_projects_all_fields() {
    let normalized = normalize_row(make_row()).unwrap();
    assert_eq!(normalized.handle, "boxy-tee");
    assert_eq!(normalized.title.as_deref(), Some("Boxy Tee"));
    assert_eq!(normalized.description.as_deref(), Some("<p>Heavyweight.</p>"));
    assert_eq!(normalized.category.as_deref(), Some("T-Shirt"));
    assert_eq!(normalized.tags.as_deref(), Some("tee, summer"));
    assert_eq!(normalized.price.as_deref(), Some("45.00"));
    assert_eq!(
        normalized.image.as_deref(),
        Some("https://cdn.example.com/boxy-a.jpg")
    );
    assert_eq!(
        normalized.variant,
        Some(Variant {
            sku: "BT-S-BLK".to_string(),
            option1: "S".to_string(),
            option2: "Black".to_string(),
            inventory_quantity: 3,
        })
    );
    assert_eq!(normalized.drop_number, Some(text("1")));
}

#[test]
fn normalize_row_rejects_missing_handle() {
    let mut row = make_row();
    row.handle = None;
    assert_eq!(normalize_row(row), Err(CatalogError::MissingHandle));
}

#[test]
fn normalize_row_rejects_blank_handle() {
    let mut row = make_row();
    row.handle = Some(text("  "));
    assert_eq!(normalize_row(row), Err(CatalogError::MissingHandle));
}

#[test]
fn normalize_row_stringifies_numeric_handle() {
    let mut row = make_row();
    row.handle = Some(CellValue::Number(1042.0));
    assert_eq!(normalize_row(row).unwrap().handle, "1042");
}

#[test]
fn normalize_row_drops_empty_image() {
    let mut row = make_row();
    row.image_src = Some(text(""));
    assert!(normalize_row(row).unwrap().image.is_none());
}

#[test]
fn normalize_row_no_variant_without_sku() {
    let mut row = make_row();
    row.variant_sku = Some(text(""));
    assert!(normalize_row(row).unwrap().variant.is_none());

    let mut row = make_row();
    row.variant_sku = None;
    assert!(normalize_row(row).unwrap().variant.is_none());
}

#[test]
fn normalize_row_defaults_missing_options_to_empty() {
    let mut row = make_row();
    row.option1_value = None;
    row.option2_value = None;
    let variant = normalize_row(row).unwrap().variant.unwrap();
    assert_eq!(variant.option1, "");
    assert_eq!(variant.option2, "");
}

#[test]
fn normalize_row_treats_empty_display_fields_as_absent() {
    let mut row = make_row();
    row.product_type = Some(text(""));
    row.title = None;
    let normalized = normalize_row(row).unwrap();
    assert!(normalized.category.is_none());
    assert!(normalized.title.is_none());
}

#[test]
fn normalize_row_passes_drop_number_through() {
    let mut row = make_row();
    row.drop_number = Some(text(""));
    assert_eq!(normalize_row(row).unwrap().drop_number, Some(text("")));

    let mut row = make_row();
    row.drop_number = Some(CellValue::Number(2.0));
    assert_eq!(
        normalize_row(row).unwrap().drop_number,
        Some(CellValue::Number(2.0))
    );
}
