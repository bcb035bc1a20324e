//! Catalog reads.

use crate::StorefrontError;
use nest_commerce::prelude::{recommendations, CatalogFilter, Product};
use nest_store::{paths, DocPath, MemoryStore};

/// Read-side of the product catalog. Writes go through
/// [`crate::AdminService`].
#[derive(Clone)]
pub struct Catalog {
    store: MemoryStore,
}

impl Catalog {
    /// Create a catalog over a store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// All products, in the order they were added.
    pub fn all_products(&self) -> Result<Vec<Product>, StorefrontError> {
        let docs: Vec<(String, Product)> = self.store.list(&paths::products())?;
        Ok(docs.into_iter().map(|(_, p)| p).collect())
    }

    /// Products matching a filter, in its sort order.
    pub fn browse(&self, filter: &CatalogFilter) -> Result<Vec<Product>, StorefrontError> {
        Ok(filter.apply(&self.all_products()?))
    }

    /// Look up by store document ID.
    pub fn by_doc_id(&self, doc_id: &str) -> Result<Product, StorefrontError> {
        let path = DocPath::in_collection(&paths::products(), doc_id);
        self.store
            .get(&path)?
            .ok_or_else(|| StorefrontError::ProductNotFound(doc_id.to_string()))
    }

    /// Look up by the product's own short code. Linear scan.
    pub fn by_product_id(&self, product_id: &str) -> Result<Product, StorefrontError> {
        self.all_products()?
            .into_iter()
            .find(|p| p.id.as_str() == product_id)
            .ok_or_else(|| StorefrontError::ProductNotFound(product_id.to_string()))
    }

    /// Up to four products related to the given one.
    pub fn related_to(&self, current: &Product) -> Result<Vec<Product>, StorefrontError> {
        let all = self.all_products()?;
        Ok(recommendations(&all, current)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_commerce::prelude::{Money, Variant};
    use nest_store::DocPath;

    fn seed(store: &MemoryStore) {
        let products = [
            {
                let mut p = Product::new("d1", "Dry Sheets", "Baby Care", "Bedding");
                p.variants
                    .push(Variant::sized("M", Money::from_rupees(499), Money::from_rupees(399), 10));
                p
            },
            {
                let mut p = Product::new("w1", "Baby Wipes", "Baby Care", "Hygiene");
                p.variants
                    .push(Variant::new(Money::from_rupees(199), Money::from_rupees(149), 25));
                p
            },
        ];
        for p in products {
            let path = DocPath::in_collection(&paths::products(), p.id.as_str());
            store.set(&path, &p).unwrap();
        }
    }

    #[test]
    fn test_all_products_in_insertion_order() {
        let store = MemoryStore::new();
        seed(&store);

        let catalog = Catalog::new(store);
        let all = catalog.all_products().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id.as_str(), "d1");
    }

    #[test]
    fn test_lookup_by_product_id() {
        let store = MemoryStore::new();
        seed(&store);

        let catalog = Catalog::new(store);
        assert_eq!(catalog.by_product_id("w1").unwrap().name, "Baby Wipes");
        assert!(matches!(
            catalog.by_product_id("zzz"),
            Err(StorefrontError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_related_shares_category() {
        let store = MemoryStore::new();
        seed(&store);

        let catalog = Catalog::new(store);
        let current = catalog.by_product_id("d1").unwrap();
        let related = catalog.related_to(&current).unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id.as_str(), "w1");
    }
}
