//! The signed-in user's cart.
//!
//! The service never trusts its own arithmetic as state: every mutator
//! writes the affected document and then rebuilds the local [`Cart`]
//! from the store's snapshot echo. What callers read is always a
//! projection of the last snapshot, so a write from another device (or
//! another clone of this store) wins the same way a local one does.

use crate::{AppContext, StorefrontError};
use nest_commerce::prelude::{Cart, CartLine, LineId, Money, Product, Variant};
use nest_store::{paths, CollectionPath, DocPath, Watcher, WriteBatch};
use tracing::debug;

/// Cart operations for the context's session.
pub struct CartService {
    ctx: AppContext,
    watcher: Option<Watcher>,
    cart: Cart,
}

impl CartService {
    /// Create a cart service; starts watching the user's cart
    /// collection if a session is attached.
    pub fn new(ctx: AppContext) -> Self {
        let watcher = ctx
            .session()
            .map(|s| ctx.store().watch(&paths::user_cart(s.user_id.as_str())));
        let mut service = Self {
            ctx,
            watcher,
            cart: Cart::new(),
        };
        service.refresh();
        service
    }

    /// The current projection. Empty when nobody is signed in.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The projected lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Total unit count, for the header badge.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Cart total.
    pub fn total(&self) -> Result<Money, StorefrontError> {
        Ok(self.cart.total()?)
    }

    /// Add one unit of a variant.
    ///
    /// Returns `false` without touching anything when nobody is signed
    /// in; the caller is expected to route to sign-in. An existing line
    /// for the same variant gains a unit instead of duplicating.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        variant: &Variant,
    ) -> Result<bool, StorefrontError> {
        if self.ctx.session().is_none() {
            return Ok(false);
        }

        let mut next = self.cart.clone();
        let id = next.add(product, variant);
        self.write_line(&next, &id)?;
        self.refresh();

        debug!(line = %id, "added to cart");
        Ok(true)
    }

    /// Set a line's quantity. Values below one clamp to one; there is
    /// no upper bound and no stock check.
    pub fn update_qty(&mut self, id: &LineId, qty: i64) -> Result<(), StorefrontError> {
        self.ctx.require_session()?;

        let mut next = self.cart.clone();
        next.set_qty(id, qty)?;
        self.write_line(&next, id)?;
        self.refresh();
        Ok(())
    }

    /// Remove a line.
    pub fn remove_line(&mut self, id: &LineId) -> Result<(), StorefrontError> {
        let collection = self.cart_collection()?;
        self.ctx
            .store()
            .delete(&DocPath::in_collection(&collection, id.as_str()));
        self.refresh();
        Ok(())
    }

    /// Remove every line in one batch.
    pub fn clear(&mut self) -> Result<(), StorefrontError> {
        let collection = self.cart_collection()?;
        let mut batch = WriteBatch::new();
        for line in self.cart.lines() {
            batch.delete(DocPath::in_collection(&collection, line.id.as_str()));
        }
        self.ctx.store().apply(batch)?;
        self.refresh();
        Ok(())
    }

    /// Drain the snapshot echo and rebuild the projection from the
    /// newest snapshot, if one arrived.
    pub fn refresh(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        if let Some(snapshot) = watcher.latest() {
            match snapshot.documents::<CartLine>() {
                Ok(docs) => {
                    self.cart = Cart::from_lines(docs.into_iter().map(|(_, line)| line).collect());
                }
                Err(e) => debug!(error = %e, "ignoring undecodable cart snapshot"),
            }
        }
    }

    fn cart_collection(&self) -> Result<CollectionPath, StorefrontError> {
        let session = self.ctx.require_session()?;
        Ok(paths::user_cart(session.user_id.as_str()))
    }

    fn write_line(&self, next: &Cart, id: &LineId) -> Result<(), StorefrontError> {
        let collection = self.cart_collection()?;
        let line = next
            .get(id)
            .ok_or_else(|| nest_commerce::prelude::CartError::LineNotFound(id.clone()))?;
        self.ctx
            .store()
            .set(&DocPath::in_collection(&collection, id.as_str()), line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthService;
    use nest_store::MemoryStore;

    fn signed_in_ctx(store: &MemoryStore) -> AppContext {
        let session = AuthService::new(store.clone())
            .sign_up("Asha", "asha@example.com", "", "secret1")
            .unwrap();
        AppContext::signed_in(store.clone(), session)
    }

    fn sheets() -> (Product, Variant) {
        let variant = Variant::sized("M", Money::from_rupees(499), Money::from_rupees(399), 10);
        let mut product = Product::new("d1", "Dry Sheets", "Baby Care", "Bedding");
        product.variants.push(variant.clone());
        (product, variant)
    }

    #[test]
    fn test_anonymous_add_is_refused() {
        let store = MemoryStore::new();
        let mut cart = CartService::new(AppContext::new(store));
        let (product, variant) = sheets();

        assert!(!cart.add_to_cart(&product, &variant).unwrap());
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_add_merges_same_variant() {
        let store = MemoryStore::new();
        let mut cart = CartService::new(signed_in_ctx(&store));
        let (product, variant) = sheets();

        cart.add_to_cart(&product, &variant).unwrap();
        cart.add_to_cart(&product, &variant).unwrap();

        assert_eq!(cart.cart().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_projection_tracks_other_writer() {
        let store = MemoryStore::new();
        let ctx = signed_in_ctx(&store);
        let mut mine = CartService::new(ctx.clone());
        let mut theirs = CartService::new(ctx);
        let (product, variant) = sheets();

        theirs.add_to_cart(&product, &variant).unwrap();
        mine.refresh();

        assert_eq!(mine.item_count(), 1);
    }

    #[test]
    fn test_qty_clamps_to_one() {
        let store = MemoryStore::new();
        let mut cart = CartService::new(signed_in_ctx(&store));
        let (product, variant) = sheets();

        cart.add_to_cart(&product, &variant).unwrap();
        let id = cart.cart().lines()[0].id.clone();

        cart.update_qty(&id, -5).unwrap();
        assert_eq!(cart.cart().get(&id).unwrap().qty, 1);

        cart.update_qty(&id, 40).unwrap();
        assert_eq!(cart.cart().get(&id).unwrap().qty, 40);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = MemoryStore::new();
        let mut cart = CartService::new(signed_in_ctx(&store));
        let (product, variant) = sheets();
        let mut flavoured = Variant::flavoured(
            "Vanilla",
            Money::from_rupees(299),
            Money::from_rupees(249),
            5,
        );
        flavoured.pack_of = "2".to_string();

        cart.add_to_cart(&product, &variant).unwrap();
        cart.add_to_cart(&product, &flavoured).unwrap();
        assert_eq!(cart.cart().len(), 2);

        let id = cart.cart().lines()[0].id.clone();
        cart.remove_line(&id).unwrap();
        assert_eq!(cart.cart().len(), 1);

        cart.clear().unwrap();
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_unit_price_snapshot_survives_catalog_change() {
        let store = MemoryStore::new();
        let mut cart = CartService::new(signed_in_ctx(&store));
        let (mut product, variant) = sheets();

        cart.add_to_cart(&product, &variant).unwrap();

        // A later price change must not touch the line already in the cart.
        product.variants[0].offer_price = Money::from_rupees(999);
        cart.refresh();

        assert_eq!(
            cart.cart().lines()[0].unit_price,
            Money::from_rupees(399)
        );
    }
}
