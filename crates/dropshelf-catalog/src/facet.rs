//! Faceted filtering over an aggregated product set.
//!
//! Selections are passed in as a [`FilterSpec`] owned by the caller. Each
//! facet's counts are computed against the products that satisfy the *other*
//! active facets, so a count answers "how many results would I see if I
//! picked this value instead".

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::str::FromStr;

use dropshelf_core::Product;
use serde::{Deserialize, Serialize};

use crate::drops::build_drop_index;

/// Selection on the drop facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSelector {
    /// Products with no drop assignment.
    Unsorted,
    /// Products whose drop key equals this text exactly.
    Key(String),
}

impl DropSelector {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            DropSelector::Unsorted => product.is_unsorted(),
            DropSelector::Key(key) => product.drop_key().as_deref() == Some(key.as_str()),
        }
    }
}

impl From<&str> for DropSelector {
    /// `"unsorted"` selects the unsorted bucket; any other text is a drop key.
    fn from(s: &str) -> Self {
        if s == "unsorted" {
            DropSelector::Unsorted
        } else {
            DropSelector::Key(s.to_owned())
        }
    }
}

impl FromStr for DropSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Active selections. `None` on a facet selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub drop: Option<DropSelector>,
    /// Exact match on [`Product::category`].
    pub category: Option<String>,
    /// Matches products with at least one variant of this colour.
    pub color: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn with_drop(mut self, drop: DropSelector) -> Self {
        self.drop = Some(drop);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    fn matches_drop(&self, product: &Product) -> bool {
        self.drop.as_ref().is_none_or(|d| d.matches(product))
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| product.category.as_deref() == Some(c))
    }

    fn matches_color(&self, product: &Product) -> bool {
        self.color.as_deref().is_none_or(|c| product.has_color(c))
    }
}

/// One candidate value of a facet and the result count it would yield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Filtered products plus per-facet counts.
#[derive(Debug, Serialize)]
pub struct FacetView<'a> {
    /// Products satisfying every active facet, in catalog order.
    pub products: Vec<&'a Product>,
    /// Every category in the catalog, alphabetical.
    pub categories: Vec<FacetCount>,
    /// Every colour in the catalog, alphabetical.
    pub colors: Vec<FacetCount>,
    /// Every drop in the catalog, in drop-index order.
    pub drops: Vec<FacetCount>,
    /// Count for the "unsorted" drop candidate.
    pub unsorted: usize,
}

impl FacetView<'_> {
    #[must_use]
    pub fn category_count(&self, category: &str) -> Option<usize> {
        lookup(&self.categories, category)
    }

    #[must_use]
    pub fn color_count(&self, color: &str) -> Option<usize> {
        lookup(&self.colors, color)
    }

    #[must_use]
    pub fn drop_count(&self, key: &str) -> Option<usize> {
        lookup(&self.drops, key)
    }
}

fn lookup(counts: &[FacetCount], value: &str) -> Option<usize> {
    counts.iter().find(|c| c.value == value).map(|c| c.count)
}

/// Applies `spec` to `products` and computes the facet count tables.
///
/// Candidate values are drawn from the full product set so options stay
/// listed (with a zero count) as filters narrow the result.
#[must_use]
pub fn apply_filters<'a>(products: &'a [Product], spec: &FilterSpec) -> FacetView<'a> {
    let mut categories: BTreeMap<&str, usize> = products
        .iter()
        .filter_map(|p| p.category.as_deref())
        .map(|c| (c, 0))
        .collect();
    let mut colors: BTreeMap<&str, usize> = products
        .iter()
        .flat_map(Product::colors)
        .map(|c| (c, 0))
        .collect();

    let mut drops: Vec<FacetCount> = build_drop_index(products)
        .groups
        .into_iter()
        .map(|g| FacetCount {
            value: g.key,
            count: 0,
        })
        .collect();
    let drop_positions: HashMap<String, usize> = drops
        .iter()
        .enumerate()
        .map(|(idx, d)| (d.value.clone(), idx))
        .collect();
    let mut unsorted = 0usize;

    let mut selected = Vec::new();

    for product in products {
        let drop_ok = spec.matches_drop(product);
        let category_ok = spec.matches_category(product);
        let color_ok = spec.matches_color(product);

        if drop_ok && color_ok {
            if let Some(count) = product
                .category
                .as_deref()
                .and_then(|c| categories.get_mut(c))
            {
                *count += 1;
            }
        }

        if drop_ok && category_ok {
            for color in product.colors() {
                if let Some(count) = colors.get_mut(color) {
                    *count += 1;
                }
            }
        }

        if category_ok && color_ok {
            match product.drop_key() {
                Some(key) => {
                    if let Some(&idx) = drop_positions.get(&key) {
                        drops[idx].count += 1;
                    }
                }
                None => unsorted += 1,
            }
        }

        if drop_ok && category_ok && color_ok {
            selected.push(product);
        }
    }

    tracing::debug!(
        selected = selected.len(),
        total = products.len(),
        ?spec,
        "filters applied"
    );

    FacetView {
        products: selected,
        categories: into_counts(categories),
        colors: into_counts(colors),
        drops,
        unsorted,
    }
}

fn into_counts(map: BTreeMap<&str, usize>) -> Vec<FacetCount> {
    map.into_iter()
        .map(|(value, count)| FacetCount {
            value: value.to_owned(),
            count,
        })
        .collect()
}

#[cfg(test)]
#[path = "facet_test.rs"]
mod tests;
