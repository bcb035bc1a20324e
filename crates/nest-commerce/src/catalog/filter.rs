//! In-memory catalog filtering and sorting.
//!
//! The storefront recomputes the visible product list from the full
//! in-memory catalog on every change: no indexing, no pagination.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sentinel meaning "no filter" for category and sub-category.
pub const ALL_FILTER: &str = "All";

/// Sort order for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Catalog insertion order.
    #[default]
    Default,
    /// Offer price, low to high.
    PriceLowHigh,
    /// Offer price, high to low.
    PriceHighLow,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::PriceLowHigh => "low-high",
            SortOrder::PriceHighLow => "high-low",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Default => "Sort by",
            SortOrder::PriceLowHigh => "Price: Low \u{2192} High",
            SortOrder::PriceHighLow => "Price: High \u{2192} Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(SortOrder::Default),
            "low-high" => Some(SortOrder::PriceLowHigh),
            "high-low" => Some(SortOrder::PriceHighLow),
            _ => None,
        }
    }
}

/// Filter state for the catalog screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring match on product name.
    pub search: String,
    /// Exact-match category, or [`ALL_FILTER`].
    pub category: String,
    /// Exact-match sub-category, or [`ALL_FILTER`].
    pub sub_category: String,
    /// Sort order.
    pub sort: SortOrder,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_FILTER.to_string(),
            sub_category: ALL_FILTER.to_string(),
            sort: SortOrder::Default,
        }
    }
}

impl CatalogFilter {
    /// Create an unfiltered view of the catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the sub-category filter.
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Apply the filter to the full product list.
    ///
    /// Filtering is re-evaluated over the whole list; the sort is
    /// stable, comparing first-variant offer prices (products without
    /// variants compare as zero).
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let search = self.search.trim().to_lowercase();

        let mut out: Vec<Product> = products
            .iter()
            .filter(|p| search.is_empty() || p.name.to_lowercase().contains(&search))
            .filter(|p| self.category == ALL_FILTER || p.category == self.category)
            .filter(|p| self.sub_category == ALL_FILTER || p.sub_category == self.sub_category)
            .cloned()
            .collect();

        let price = |p: &Product| p.display_price().unwrap_or_else(Money::zero);
        match self.sort {
            SortOrder::Default => {}
            SortOrder::PriceLowHigh => out.sort_by_key(price),
            SortOrder::PriceHighLow => out.sort_by_key(|p| std::cmp::Reverse(price(p))),
        }

        out
    }
}

/// Distinct categories in insertion order, behind an `"All"` head.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut list = vec![ALL_FILTER.to_string()];
    for p in products {
        if !list.contains(&p.category) {
            list.push(p.category.clone());
        }
    }
    list
}

/// Distinct sub-categories of a category, behind an `"All"` head.
///
/// With the category filter unset this collapses to just `"All"`.
pub fn sub_categories(products: &[Product], category: &str) -> Vec<String> {
    let mut list = vec![ALL_FILTER.to_string()];
    if category == ALL_FILTER {
        return list;
    }
    for p in products.iter().filter(|p| p.category == category) {
        if !list.contains(&p.sub_category) {
            list.push(p.sub_category.clone());
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;

    fn product(id: &str, name: &str, category: &str, sub: &str, offer: i64) -> Product {
        let mut p = Product::new(id, name, category, sub);
        p.variants.push(Variant::new(
            Money::from_rupees(offer + 100),
            Money::from_rupees(offer),
            10,
        ));
        p
    }

    fn sample() -> Vec<Product> {
        vec![
            product("d1", "Soft Diapers", "Baby Care", "Diapers", 399),
            product("w1", "Baby Wipes", "Baby Care", "Wipes", 99),
            product("s1", "Gentle Soap", "Personal Care", "Soap", 49),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filtered = CatalogFilter::new().with_search("DIAPER").apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "d1");
    }

    #[test]
    fn test_category_exact_match() {
        let filtered = CatalogFilter::new()
            .with_category("Baby Care")
            .apply(&sample());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sub_category_exact_match() {
        let filtered = CatalogFilter::new()
            .with_category("Baby Care")
            .with_sub_category("Wipes")
            .apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_str(), "w1");
    }

    #[test]
    fn test_sort_low_high() {
        let filtered = CatalogFilter::new()
            .with_sort(SortOrder::PriceLowHigh)
            .apply(&sample());
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "w1", "d1"]);
    }

    #[test]
    fn test_sort_high_low() {
        let filtered = CatalogFilter::new()
            .with_sort(SortOrder::PriceHighLow)
            .apply(&sample());
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "w1", "s1"]);
    }

    #[test]
    fn test_product_without_variants_sorts_as_zero() {
        let mut products = sample();
        products.push(Product::new("x1", "No Price", "Misc", "Misc"));

        let filtered = CatalogFilter::new()
            .with_sort(SortOrder::PriceLowHigh)
            .apply(&products);
        assert_eq!(filtered[0].id.as_str(), "x1");
    }

    #[test]
    fn test_categories_in_insertion_order() {
        assert_eq!(
            categories(&sample()),
            vec!["All", "Baby Care", "Personal Care"]
        );
    }

    #[test]
    fn test_sub_categories_require_category() {
        assert_eq!(sub_categories(&sample(), ALL_FILTER), vec!["All"]);
        assert_eq!(
            sub_categories(&sample(), "Baby Care"),
            vec!["All", "Diapers", "Wipes"]
        );
    }
}
