//! Product catalog module.
//!
//! Contains product/variant types, in-memory filtering, and
//! recommendations.

mod filter;
mod product;
mod recommend;

pub use filter::{categories, sub_categories, CatalogFilter, SortOrder, ALL_FILTER};
pub use product::{Product, Variant, PLACEHOLDER_IMAGE};
pub use recommend::{recommendations, RECOMMENDATION_LIMIT};
