//! Order placement.

use crate::{AppContext, CartService, StorefrontError};
use nest_commerce::prelude::{validate_shipping, CheckoutError, Order, ShippingDetails};
use nest_store::{paths, DocPath, WriteBatch};
use tracing::info;

/// Turns a cart into an order.
pub struct CheckoutService {
    ctx: AppContext,
}

impl CheckoutService {
    /// Create a checkout service.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Place a cash-on-delivery order for everything in the cart.
    ///
    /// Validates the shipping details first, then writes the order and
    /// deletes every cart line in one atomic batch. Either the order
    /// exists and the cart is empty, or neither happened.
    pub fn place_order(
        &self,
        cart: &mut CartService,
        shipping: ShippingDetails,
    ) -> Result<Order, StorefrontError> {
        let session = self.ctx.require_session()?;
        let uid = session.user_id.as_str();

        cart.refresh();
        if cart.cart().is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        validate_shipping(&shipping)?;

        let amount = cart.cart().total()?;
        let items = cart.cart().lines().to_vec();
        let order = Order::new(items, amount, shipping);

        let cart_collection = paths::user_cart(uid);
        let orders = paths::user_orders(uid);
        let mut batch = WriteBatch::new();
        batch.set(DocPath::in_collection(&orders, order.id.as_str()), &order)?;
        for line in cart.cart().lines() {
            batch.delete(DocPath::in_collection(&cart_collection, line.id.as_str()));
        }
        self.ctx.store().apply(batch)?;
        cart.refresh();

        info!(order = %order.id, amount = %order.amount, "order placed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthService;
    use nest_commerce::prelude::{Money, PaymentMode, Product, Variant};
    use nest_store::MemoryStore;

    fn signed_in_ctx(store: &MemoryStore) -> AppContext {
        let session = AuthService::new(store.clone())
            .sign_up("Asha", "asha@example.com", "", "secret1")
            .unwrap();
        AppContext::signed_in(store.clone(), session)
    }

    fn filled_cart(ctx: &AppContext) -> CartService {
        let variant = Variant::sized("M", Money::from_rupees(499), Money::from_rupees(399), 10);
        let mut product = Product::new("d1", "Dry Sheets", "Baby Care", "Bedding");
        product.variants.push(variant.clone());

        let mut cart = CartService::new(ctx.clone());
        cart.add_to_cart(&product, &variant).unwrap();
        cart.add_to_cart(&product, &variant).unwrap();
        cart
    }

    fn wardha_shipping() -> ShippingDetails {
        ShippingDetails::new("Asha", "9422000000", "12 Civil Lines, Wardha", "442001")
    }

    #[test]
    fn test_place_order_clears_cart_atomically() {
        let store = MemoryStore::new();
        let ctx = signed_in_ctx(&store);
        let mut cart = filled_cart(&ctx);
        let lines_at_checkout = cart.cart().lines().to_vec();

        let order = CheckoutService::new(ctx.clone())
            .place_order(&mut cart, wardha_shipping())
            .unwrap();

        assert_eq!(order.amount, Money::from_rupees(798));
        assert_eq!(order.payment_mode, PaymentMode::CashOnDelivery);
        assert!(cart.cart().is_empty());

        let session = ctx.session().unwrap();
        let orders: Vec<(String, Order)> = store
            .list(&paths::user_orders(session.user_id.as_str()))
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].0, order.id.as_str());
        // The stored item list is the cart as it stood at the call.
        assert_eq!(orders[0].1.items, lines_at_checkout);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let store = MemoryStore::new();
        let ctx = signed_in_ctx(&store);
        let mut cart = CartService::new(ctx.clone());

        let err = CheckoutService::new(ctx).place_order(&mut cart, wardha_shipping());
        assert!(matches!(
            err,
            Err(StorefrontError::Checkout(CheckoutError::EmptyCart))
        ));
    }

    #[test]
    fn test_out_of_area_pincode_keeps_cart() {
        let store = MemoryStore::new();
        let ctx = signed_in_ctx(&store);
        let mut cart = filled_cart(&ctx);

        let nagpur =
            ShippingDetails::new("Asha", "9422000000", "44 Residency Road, Nagpur", "440001");
        let err = CheckoutService::new(ctx).place_order(&mut cart, nagpur);

        assert!(matches!(
            err,
            Err(StorefrontError::Checkout(
                CheckoutError::UnserviceablePincode(_)
            ))
        ));
        // Nothing was written; the cart projection is untouched.
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_anonymous_cannot_place() {
        let store = MemoryStore::new();
        let signed = signed_in_ctx(&store);
        let mut cart = filled_cart(&signed);

        let anonymous = AppContext::new(store);
        let err = CheckoutService::new(anonymous).place_order(&mut cart, wardha_shipping());
        assert!(matches!(err, Err(StorefrontError::NotSignedIn)));
    }

    #[test]
    fn test_order_id_is_millis_string() {
        let store = MemoryStore::new();
        let ctx = signed_in_ctx(&store);
        let mut cart = filled_cart(&ctx);

        let order = CheckoutService::new(ctx)
            .place_order(&mut cart, wardha_shipping())
            .unwrap();
        assert!(order.id.as_str().parse::<i64>().is_ok());
    }
}
