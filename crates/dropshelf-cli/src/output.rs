//! Table and JSON rendering for the subcommands.
//!
//! Each `render_*` writes to any [`Write`] so the layout can be checked in
//! tests; the `print_*` wrappers send it to stdout.

use std::io::{self, Write};

use dropshelf_catalog::{FacetCount, FacetView, SizeMatchEntry};
use dropshelf_core::{Catalog, Product};

const DASH: &str = "-";

/// Images shown per product in the detail view.
const DETAIL_IMAGES: usize = 2;

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn to_stdout(
    render: impl FnOnce(&mut io::StdoutLock<'_>) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    render(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
pub(crate) fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_owned()
    }
}

pub(crate) fn print_drops(catalog: &Catalog, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "drops": catalog.drops.groups,
            "unsorted": catalog.drops.unsorted_count,
            "skipped_rows": catalog.skipped_rows,
        }));
    }
    to_stdout(|out| render_drops(out, catalog))
}

pub(crate) fn render_drops(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    if catalog.is_empty() {
        return writeln!(out, "no products found");
    }

    writeln!(out, "{:<10}PRODUCTS", "DROP")?;
    for group in &catalog.drops.groups {
        writeln!(out, "{:<10}{}", group.key, group.count)?;
    }
    writeln!(out, "{:<10}{}", "unsorted", catalog.drops.unsorted_count)?;
    if catalog.skipped_rows > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} row(s) skipped for missing handle",
            catalog.skipped_rows
        )?;
    }
    Ok(())
}

pub(crate) fn print_products(view: &FacetView<'_>, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(view);
    }
    to_stdout(|out| render_products(out, view))
}

pub(crate) fn render_products(out: &mut impl Write, view: &FacetView<'_>) -> io::Result<()> {
    if view.products.is_empty() {
        writeln!(out, "no products match the selected filters")?;
    } else {
        writeln!(
            out,
            "{:<32}{:<36}{:<14}{:<8}{:<16}STOCK",
            "HANDLE", "TITLE", "CATEGORY", "DROP", "COLOR"
        )?;
        for product in &view.products {
            let drop = product.drop_key();
            writeln!(
                out,
                "{:<32}{:<36}{:<14}{:<8}{:<16}{}",
                clip(&product.handle, 30),
                clip(product.title.as_deref().unwrap_or(DASH), 33),
                clip(product.category.as_deref().unwrap_or(DASH), 12),
                drop.as_deref().unwrap_or(DASH),
                clip(product.primary_color().unwrap_or(DASH), 14),
                product.total_inventory()
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "categories: {}", facet_line(&view.categories))?;
    writeln!(out, "colors:     {}", facet_line(&view.colors))?;
    writeln!(
        out,
        "drops:      {}{}unsorted ({})",
        facet_line(&view.drops),
        if view.drops.is_empty() { "" } else { ", " },
        view.unsorted
    )
}

pub(crate) fn facet_line(counts: &[FacetCount]) -> String {
    counts
        .iter()
        .map(|c| format!("{} ({})", c.value, c.count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn print_product_details(products: &[&Product], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&products);
    }
    to_stdout(|out| render_product_details(out, products))
}

/// Detail view: id, title, description, type, tags, images and the variant
/// table of each product.
pub(crate) fn render_product_details(
    out: &mut impl Write,
    products: &[&Product],
) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "no products found");
    }

    for (idx, product) in products.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "ID: {} ({})", product.short_id(), product.handle)?;
        writeln!(out, "{}", product.title.as_deref().unwrap_or(DASH))?;
        writeln!(out, "Type: {}", product.category.as_deref().unwrap_or(DASH))?;

        let tags = product.tag_list();
        if tags.is_empty() {
            writeln!(out, "Tags: {DASH}")?;
        } else {
            writeln!(out, "Tags: {}", tags.join(", "))?;
        }
        let drop = product.drop_key();
        writeln!(out, "Drop: {}", drop.as_deref().unwrap_or("unsorted"))?;
        for image in product.images.iter().take(DETAIL_IMAGES) {
            writeln!(out, "Image: {image}")?;
        }
        if let Some(description) = &product.description {
            writeln!(out, "Description:")?;
            for line in description.lines() {
                writeln!(out, "  {line}")?;
            }
        }

        writeln!(out, "Variants:")?;
        if product.variants.is_empty() {
            writeln!(out, "  none")?;
            continue;
        }
        writeln!(out, "  {:<20}{:<24}INVENTORY", "SKU", "OPTIONS")?;
        for variant in &product.variants {
            writeln!(
                out,
                "  {:<20}{:<24}{}",
                variant.sku,
                variant.options_label(),
                variant.inventory_quantity
            )?;
        }
    }
    Ok(())
}

pub(crate) fn print_size_match(entries: &[SizeMatchEntry], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&entries);
    }
    to_stdout(|out| render_size_match(out, entries))
}

/// Sized variants followed by the derived image sequence. The sequence is
/// the size chart then one on-model shot per size after the first, so it is
/// listed as-is rather than paired with sizes.
pub(crate) fn render_size_match(
    out: &mut impl Write,
    entries: &[SizeMatchEntry],
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "no products found");
    }

    for entry in entries {
        writeln!(
            out,
            "{} ({})",
            entry.title.as_deref().unwrap_or(&entry.handle),
            entry.handle
        )?;
        if entry.sizes.is_empty() {
            writeln!(out, "  no sized variants")?;
        } else {
            writeln!(out, "  {:<8}{:<20}STOCK", "SIZE", "SKU")?;
            for size in &entry.sizes {
                writeln!(
                    out,
                    "  {:<8}{:<20}{}",
                    size.size, size.sku, size.inventory_quantity
                )?;
            }
        }

        let mut images = entry.images.iter();
        if let Some(chart) = images.next() {
            writeln!(out, "  size chart: {chart}")?;
        }
        for shot in images {
            writeln!(out, "  photo:      {shot}")?;
        }
    }
    Ok(())
}
