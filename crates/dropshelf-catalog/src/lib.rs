//! Sheet rows in, normalized catalog out.
//!
//! The pipeline is a pure function of its input: [`normalize`] projects each
//! loosely-typed [`RawRow`], [`aggregate`] folds the projections into
//! products and a drop index, and [`facet`] filters the result for display.

pub mod aggregate;
pub mod drops;
pub mod error;
pub mod facet;
pub mod normalize;
pub mod raw;
pub mod size_match;

pub use aggregate::{build_catalog, CatalogBuilder};
pub use drops::build_drop_index;
pub use error::CatalogError;
pub use facet::{apply_filters, DropSelector, FacetCount, FacetView, FilterSpec};
pub use normalize::{normalize_row, parse_inventory_quantity, NormalizedRow};
pub use raw::RawRow;
pub use size_match::{size_match, SizeMatchEntry, SizedVariant};
