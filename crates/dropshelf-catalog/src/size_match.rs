//! Per-product size breakdown with the size-chart image sequence.
//!
//! Product photography follows a letter-suffixed naming scheme: the hero shot
//! ends in `a.jpg`, the size chart in `b.jpg`, and one on-model shot per size
//! from `e.jpg` onwards.

use dropshelf_core::Product;
use serde::Serialize;

/// Suffix of the hero image the derived URLs are built from.
const HERO_SUFFIX: &str = "a.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizedVariant {
    pub sku: String,
    pub size: String,
    pub inventory_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeMatchEntry {
    pub handle: String,
    pub title: Option<String>,
    /// Variants with a size, in catalog order.
    pub sizes: Vec<SizedVariant>,
    pub images: Vec<String>,
}

/// Builds the size-match listing for every product, in catalog order.
#[must_use]
pub fn size_match(products: &[Product]) -> Vec<SizeMatchEntry> {
    products
        .iter()
        .map(|product| {
            let sizes: Vec<SizedVariant> = product
                .variants
                .iter()
                .filter(|v| !v.option1.is_empty())
                .map(|v| SizedVariant {
                    sku: v.sku.clone(),
                    size: v.option1.clone(),
                    inventory_quantity: v.inventory_quantity,
                })
                .collect();

            let images = product
                .images
                .first()
                .map(|hero| derive_image_urls(hero, sizes.len().max(1)))
                .unwrap_or_default();

            SizeMatchEntry {
                handle: product.handle.clone(),
                title: product.title.clone(),
                sizes,
                images,
            }
        })
        .collect()
}

/// Derives `count` image URLs from the hero image URL.
///
/// The first is the size chart (`b.jpg`); each following one takes the next
/// letter starting at `e`. Only the first `a.jpg` in the URL is replaced; a
/// URL without it is repeated unchanged.
pub(crate) fn derive_image_urls(hero: &str, count: usize) -> Vec<String> {
    let mut urls = Vec::with_capacity(count.max(1));
    urls.push(hero.replacen(HERO_SUFFIX, "b.jpg", 1));

    let letters = ('e'..=char::MAX).take(count.saturating_sub(1));
    for letter in letters {
        urls.push(hero.replacen(HERO_SUFFIX, &format!("{letter}.jpg"), 1));
    }
    urls
}
