//! Single-pass fold of sheet rows into a [`Catalog`].

use std::collections::HashMap;

use dropshelf_core::{Catalog, Product};

use crate::drops::build_drop_index;
use crate::normalize::{normalize_row, NormalizedRow};
use crate::raw::RawRow;

/// Accumulator for one aggregation pass.
///
/// Products are kept in first-occurrence order; the handle map only serves
/// lookups, so iteration order never depends on hashing.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    products: Vec<Product>,
    positions: HashMap<String, usize>,
    raw_rows: usize,
    skipped_rows: usize,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes and folds one raw row. Rows without a handle are logged
    /// and skipped.
    pub fn push_raw(&mut self, row: RawRow) {
        self.raw_rows += 1;
        match normalize_row(row) {
            Ok(normalized) => self.push(normalized),
            Err(e) => {
                self.skipped_rows += 1;
                tracing::warn!(row = self.raw_rows, error = %e, "skipping malformed sheet row");
            }
        }
    }

    /// Folds one normalized row into its product.
    ///
    /// The first row for a handle fixes the product's scalar fields; later
    /// rows only contribute images and variants.
    pub fn push(&mut self, row: NormalizedRow) {
        let NormalizedRow {
            handle,
            title,
            description,
            category,
            tags,
            price,
            image,
            variant,
            drop_number,
        } = row;

        let idx = match self.positions.get(&handle).copied() {
            Some(idx) => idx,
            None => {
                let idx = self.products.len();
                self.positions.insert(handle.clone(), idx);
                self.products.push(Product {
                    handle,
                    title,
                    description,
                    category,
                    tags,
                    price,
                    drop_number,
                    images: Vec::new(),
                    variants: Vec::new(),
                });
                idx
            }
        };

        let product = &mut self.products[idx];

        // Linear scan: products carry a handful of images at most.
        if let Some(image) = image {
            if !product.images.contains(&image) {
                product.images.push(image);
            }
        }

        if let Some(variant) = variant {
            product.variants.push(variant);
        }
    }

    /// Ends the pass and derives the drop index from the finished products.
    #[must_use]
    pub fn finish(self) -> Catalog {
        let drops = build_drop_index(&self.products);

        tracing::debug!(
            rows = self.raw_rows,
            products = self.products.len(),
            skipped = self.skipped_rows,
            drops = drops.groups.len(),
            unsorted = drops.unsorted_count,
            "catalog built"
        );

        Catalog {
            products: self.products,
            drops,
            skipped_rows: self.skipped_rows,
        }
    }
}

/// Builds a catalog from rows in source order.
///
/// Never fails: malformed rows are skipped and an empty input yields an
/// empty catalog.
pub fn build_catalog<I>(rows: I) -> Catalog
where
    I: IntoIterator<Item = RawRow>,
{
    rows.into_iter()
        .fold(CatalogBuilder::new(), |mut builder, row| {
            builder.push_raw(row);
            builder
        })
        .finish()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
