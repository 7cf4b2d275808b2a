use serde::{Deserialize, Serialize};

use crate::CellValue;

/// A product assembled from every sheet row sharing one handle.
///
/// Scalar fields come from the first row seen for the handle and are never
/// overwritten by later rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identity key, e.g. `"boxy-tee-washed-black"`. Unique across a catalog.
    pub handle: String,
    pub title: Option<String>,
    /// Raw HTML from the `Body (HTML)` column.
    pub description: Option<String>,
    /// Product category from the `Type` column.
    pub category: Option<String>,
    /// Comma-separated tag string, passed through as-is.
    pub tags: Option<String>,
    pub price: Option<String>,
    /// Drop assignment exactly as the sheet supplied it. `None` or an empty
    /// text cell means the product is unsorted.
    pub drop_number: Option<CellValue>,
    /// Image references in first-seen order, without duplicates.
    pub images: Vec<String>,
    /// Variants in row order. Repeated SKUs are kept.
    pub variants: Vec<Variant>,
}

impl Product {
    /// String form of the drop assignment, or `None` when unsorted.
    #[must_use]
    pub fn drop_key(&self) -> Option<String> {
        match &self.drop_number {
            Some(value) if !value.is_empty_text() => Some(value.to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.drop_key().is_none()
    }

    /// Distinct non-empty colour values (`option2`) in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for variant in &self.variants {
            let color = variant.option2.as_str();
            if !color.is_empty() && !seen.contains(&color) {
                seen.push(color);
            }
        }
        seen
    }

    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.variants.iter().any(|v| v.option2 == color)
    }

    /// Colour shown on the product card: the first variant's `option2`.
    #[must_use]
    pub fn primary_color(&self) -> Option<&str> {
        self.variants
            .first()
            .map(|v| v.option2.as_str())
            .filter(|c| !c.is_empty())
    }

    #[must_use]
    pub fn total_inventory(&self) -> i64 {
        self.variants.iter().map(|v| v.inventory_quantity).sum()
    }

    /// Short product id: the text after the last `-` of the handle, or the
    /// whole handle when it has none.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.handle.rsplit('-').next().unwrap_or(&self.handle)
    }

    /// Tags split on `,` and trimmed. Blank entries are dropped.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A purchasable SKU with its size/colour option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Never empty; rows without a SKU carry no variant.
    pub sku: String,
    /// Size, e.g. `"M"`. Empty when the sheet leaves it blank.
    pub option1: String,
    /// Colour, e.g. `"Washed Black"`. Empty when the sheet leaves it blank.
    pub option2: String,
    pub inventory_quantity: i64,
}

impl Variant {
    /// Size and colour joined as `"M / Black"`, skipping blank values.
    #[must_use]
    pub fn options_label(&self) -> String {
        [self.option1.as_str(), self.option2.as_str()]
            .into_iter()
            .filter(|o| !o.is_empty())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Number of distinct products assigned to one drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropGroup {
    pub key: String,
    pub count: usize,
}

/// Partition of a catalog's products into drops and the unsorted bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndex {
    /// Ordered by ascending numeric drop key; non-numeric keys last.
    pub groups: Vec<DropGroup>,
    pub unsorted_count: usize,
}

impl DropIndex {
    /// Product count for `key`, or `0` when no product belongs to it.
    #[must_use]
    pub fn count_for(&self, key: &str) -> usize {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map_or(0, |g| g.count)
    }

    /// Sum over every drop plus the unsorted bucket.
    #[must_use]
    pub fn total_products(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum::<usize>() + self.unsorted_count
    }
}

/// The normalized result of one pass over the sheet rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Products ordered by first occurrence of their handle.
    pub products: Vec<Product>,
    pub drops: DropIndex,
    /// Rows discarded because they carried no handle.
    pub skipped_rows: usize,
}

impl Catalog {
    #[must_use]
    pub fn product(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
