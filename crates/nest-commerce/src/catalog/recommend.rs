//! Related-product recommendations.

use crate::catalog::Product;

/// Maximum number of recommended products.
pub const RECOMMENDATION_LIMIT: usize = 4;

/// Select products related to `current`.
///
/// A candidate qualifies when it shares the category, the sub-category,
/// or any tag with `current`. The current product itself is excluded.
/// Results keep catalog order and are truncated to
/// [`RECOMMENDATION_LIMIT`]; there is no ranking beyond the boolean
/// union of the three criteria.
pub fn recommendations<'a>(all: &'a [Product], current: &Product) -> Vec<&'a Product> {
    all.iter()
        .filter(|p| p.id != current.id)
        .filter(|p| {
            p.category == current.category
                || p.sub_category == current.sub_category
                || p.shares_tag_with(current)
        })
        .take(RECOMMENDATION_LIMIT)
        .collect()
}
