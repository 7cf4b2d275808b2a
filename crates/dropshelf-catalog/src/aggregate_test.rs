use std::collections::HashSet;

use dropshelf_core::{CellValue, DropGroup};

use super::*;

fn row(
    handle: Option<&str>,
    drop: Option<&str>,
    image: Option<&str>,
    sku: Option<&str>,
    color: &str,
) -> RawRow {
    RawRow {
        handle: handle.map(CellValue::from),
        title: handle.map(|h| CellValue::from(format!("Title {h}"))),
        drop_number: drop.map(CellValue::from),
        image_src: image.map(CellValue::from),
        variant_sku: sku.map(CellValue::from),
        option2_value: Some(CellValue::from(color)),
        ..RawRow::default()
    }
}

fn scenario_rows() -> Vec<RawRow> {
    vec![
        row(Some("A"), Some("1"), Some("x.jpg"), Some("A-1"), "Red"),
        row(Some("A"), Some("1"), Some("x.jpg"), Some("A-2"), "Red"),
        row(Some("B"), Some(""), Some("y.jpg"), Some("B-1"), "Blue"),
    ]
}

#[test]
fn scenario_groups_rows_into_products_and_drops() {
    let catalog = build_catalog(scenario_rows());

    assert_eq!(catalog.len(), 2);
    let a = catalog.product("A").expect("product A");
    assert_eq!(a.variants.len(), 2);
    assert_eq!(a.images, vec!["x.jpg"]);

    let b = catalog.product("B").expect("product B");
    assert_eq!(b.variants.len(), 1);
    assert_eq!(b.images, vec!["y.jpg"]);

    assert_eq!(
        catalog.drops.groups,
        vec![DropGroup {
            key: "1".to_string(),
            count: 1
        }]
    );
    assert_eq!(catalog.drops.unsorted_count, 1);
    assert_eq!(catalog.skipped_rows, 0);
}

#[test]
fn empty_input_is_an_empty_catalog() {
    let catalog = build_catalog(Vec::new());
    assert!(catalog.is_empty());
    assert!(catalog.drops.groups.is_empty());
    assert_eq!(catalog.drops.unsorted_count, 0);
    assert_eq!(catalog.skipped_rows, 0);
}

#[test]
fn rows_without_handle_are_skipped_not_bucketed() {
    let rows = vec![
        row(None, Some("1"), Some("orphan.jpg"), Some("O-1"), "Red"),
        row(Some("A"), Some("1"), None, Some("A-1"), "Red"),
        row(Some(""), None, None, Some("O-2"), "Red"),
    ];
    let catalog = build_catalog(rows);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.skipped_rows, 2);
    assert_eq!(catalog.drops.count_for("1"), 1);
}

#[test]
fn product_count_matches_distinct_valid_handles() {
    let rows = vec![
        row(Some("A"), None, None, None, ""),
        row(Some("B"), None, None, None, ""),
        row(None, None, None, None, ""),
        row(Some("A"), None, None, None, ""),
        row(Some("C"), None, None, None, ""),
        row(Some("B"), None, None, None, ""),
    ];
    let distinct: HashSet<_> = rows
        .iter()
        .filter_map(|r| r.handle.as_ref().map(ToString::to_string))
        .collect();
    let catalog = build_catalog(rows);
    assert_eq!(catalog.len(), distinct.len());
}

#[test]
fn products_keep_first_occurrence_order() {
    let rows = vec![
        row(Some("C"), None, None, None, ""),
        row(Some("A"), None, None, None, ""),
        row(Some("C"), None, None, None, ""),
        row(Some("B"), None, None, None, ""),
    ];
    let catalog = build_catalog(rows);
    let handles: Vec<&str> = catalog.products.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["C", "A", "B"]);
}

#[test]
fn scalar_fields_fixed_by_first_row() {
    let mut first = row(Some("A"), None, None, Some("A-1"), "Red");
    first.product_type = Some(CellValue::from("Hoodie"));
    first.variant_price = Some(CellValue::from("80.00"));

    let mut second = row(Some("A"), Some("4"), None, Some("A-2"), "Red");
    second.title = Some(CellValue::from("Renamed"));
    second.product_type = Some(CellValue::from("Tee"));
    second.variant_price = Some(CellValue::from("10.00"));

    let catalog = build_catalog(vec![first, second]);
    let a = &catalog.products[0];
    assert_eq!(a.title.as_deref(), Some("Title A"));
    assert_eq!(a.category.as_deref(), Some("Hoodie"));
    assert_eq!(a.price.as_deref(), Some("80.00"));
    // The second row's drop number must not promote the product out of unsorted.
    assert!(a.is_unsorted());
    assert_eq!(catalog.drops.unsorted_count, 1);
}

#[test]
fn images_are_deduplicated_in_first_seen_order() {
    let rows = vec![
        row(Some("A"), None, Some("b.jpg"), None, ""),
        row(Some("A"), None, Some("a.jpg"), None, ""),
        row(Some("A"), None, Some("b.jpg"), None, ""),
        row(Some("A"), None, Some(""), None, ""),
        row(Some("A"), None, Some("c.jpg"), None, ""),
    ];
    let catalog = build_catalog(rows);
    assert_eq!(catalog.products[0].images, vec!["b.jpg", "a.jpg", "c.jpg"]);
}

#[test]
fn duplicate_skus_are_kept() {
    let rows = vec![
        row(Some("A"), None, None, Some("A-1"), "Red"),
        row(Some("A"), None, None, Some("A-1"), "Red"),
    ];
    let catalog = build_catalog(rows);
    assert_eq!(catalog.products[0].variants.len(), 2);
}

#[test]
fn rows_without_sku_add_no_variant() {
    let rows = vec![
        row(Some("A"), None, Some("x.jpg"), None, "Red"),
        row(Some("A"), None, Some("y.jpg"), Some(""), "Red"),
    ];
    let catalog = build_catalog(rows);
    assert!(catalog.products[0].variants.is_empty());
    assert_eq!(catalog.products[0].images.len(), 2);
}

#[test]
fn aggregation_is_idempotent() {
    let first = build_catalog(scenario_rows());
    let second = build_catalog(scenario_rows());
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn builder_accepts_pre_normalized_rows() {
    let mut builder = CatalogBuilder::new();
    for raw in scenario_rows() {
        builder.push(normalize_row(raw).unwrap());
    }
    assert_eq!(builder.finish(), build_catalog(scenario_rows()));
}
