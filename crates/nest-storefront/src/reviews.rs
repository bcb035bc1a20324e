//! Product reviews.

use crate::{AppContext, StorefrontError};
use nest_commerce::prelude::{Order, ProductId, Review};
use nest_store::{paths, DocPath};
use tracing::info;

/// Submitting and listing reviews.
pub struct ReviewService {
    ctx: AppContext,
}

impl ReviewService {
    /// Create a review service.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Submit a review for a product from a delivered order.
    ///
    /// The order gates the action: anything short of delivered is
    /// refused, including cancelled orders.
    pub fn submit(
        &self,
        order: &Order,
        product_id: ProductId,
        rating: i32,
        text: &str,
    ) -> Result<Review, StorefrontError> {
        let session = self.ctx.require_session()?;
        if !order.status.allows_review() {
            return Err(StorefrontError::ReviewNotAllowed);
        }

        let review = Review::new(
            product_id,
            session.user_id.clone(),
            session.name.clone(),
            rating,
            text,
        )?;
        let path = DocPath::in_collection(&paths::product_reviews(), review.id.as_str());
        self.ctx.store().set(&path, &review)?;

        info!(review = %review.id, product = %review.product_id, "review submitted");
        Ok(review)
    }

    /// Reviews for one product, newest first.
    pub fn for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, StorefrontError> {
        let docs: Vec<(String, Review)> = self.ctx.store().list(&paths::product_reviews())?;
        let mut reviews: Vec<Review> = docs
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| r.product_id == *product_id)
            .collect();
        reviews.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuthService;
    use nest_commerce::prelude::{
        Money, OrderStatus, ReviewError, ShippingDetails, Variant,
    };
    use nest_commerce::prelude::{CartLine, Product};
    use nest_store::MemoryStore;

    fn ctx(store: &MemoryStore) -> AppContext {
        let session = AuthService::new(store.clone())
            .sign_up("Asha", "asha@example.com", "", "secret1")
            .unwrap();
        AppContext::signed_in(store.clone(), session)
    }

    fn order_with_status(status: OrderStatus) -> Order {
        let variant = Variant::sized("M", Money::from_rupees(499), Money::from_rupees(399), 10);
        let mut product = Product::new("d1", "Dry Sheets", "Baby Care", "Bedding");
        product.variants.push(variant.clone());

        let line = CartLine::new(&product, &variant);
        let shipping = ShippingDetails::new("Asha", "9422000000", "12 Civil Lines", "442001");
        let mut order = Order::new(vec![line], Money::from_rupees(399), shipping);
        order.set_status(status);
        order
    }

    #[test]
    fn test_review_after_delivery() {
        let store = MemoryStore::new();
        let service = ReviewService::new(ctx(&store));
        let order = order_with_status(OrderStatus::Delivered);

        let review = service
            .submit(&order, ProductId::new("d1"), 5, "Kept the crib dry all night")
            .unwrap();
        assert_eq!(review.user_name, "Asha");

        let listed = service.for_product(&ProductId::new("d1")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rating, 5);
    }

    #[test]
    fn test_review_gated_until_delivered() {
        let store = MemoryStore::new();
        let service = ReviewService::new(ctx(&store));

        for status in [
            OrderStatus::Pending,
            OrderStatus::Packed,
            OrderStatus::OutForDelivery,
            OrderStatus::Cancelled,
        ] {
            let order = order_with_status(status);
            let err = service.submit(&order, ProductId::new("d1"), 5, "nice");
            assert!(matches!(err, Err(StorefrontError::ReviewNotAllowed)));
        }
    }

    #[test]
    fn test_invalid_rating_propagates() {
        let store = MemoryStore::new();
        let service = ReviewService::new(ctx(&store));
        let order = order_with_status(OrderStatus::Delivered);

        let err = service.submit(&order, ProductId::new("d1"), 6, "too good");
        assert!(matches!(
            err,
            Err(StorefrontError::Review(ReviewError::InvalidRating(6)))
        ));
    }

    #[test]
    fn test_listing_filters_by_product() {
        let store = MemoryStore::new();
        let service = ReviewService::new(ctx(&store));
        let order = order_with_status(OrderStatus::Delivered);

        service
            .submit(&order, ProductId::new("d1"), 4, "good")
            .unwrap();
        service
            .submit(&order, ProductId::new("w1"), 3, "fine")
            .unwrap();

        assert_eq!(service.for_product(&ProductId::new("d1")).unwrap().len(), 1);
    }
}
