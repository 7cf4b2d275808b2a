//! Derivation of the [`DropIndex`] from an aggregated product set.

use std::cmp::Ordering;
use std::collections::HashMap;

use dropshelf_core::{DropGroup, DropIndex, Product};

/// Counts products per drop key, plus the unsorted bucket.
///
/// Every product lands in exactly one place: a drop group when it has a
/// non-empty drop key, the unsorted count otherwise.
#[must_use]
pub fn build_drop_index(products: &[Product]) -> DropIndex {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut unsorted_count = 0usize;

    for product in products {
        match product.drop_key() {
            Some(key) => *counts.entry(key).or_default() += 1,
            None => unsorted_count += 1,
        }
    }

    let mut groups: Vec<DropGroup> = counts
        .into_iter()
        .map(|(key, count)| DropGroup { key, count })
        .collect();
    groups.sort_by(|a, b| compare_drop_keys(&a.key, &b.key));

    DropIndex {
        groups,
        unsorted_count,
    }
}

/// Orders drop keys by numeric value, numeric keys before non-numeric ones.
///
/// Equal numeric values (`"1"` vs `"01"`) and pairs of non-numeric keys fall
/// back to plain string order, so the result is total and deterministic.
pub(crate) fn compare_drop_keys(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn numeric_key(key: &str) -> Option<f64> {
    key.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
