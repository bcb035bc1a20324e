//! Retail domain types and logic for the Nestmart storefront.
//!
//! This crate holds the pure, I/O-free core of the system:
//!
//! - **Catalog**: products, variants, in-memory filtering, recommendations
//! - **Cart**: line identity, merge-on-add, quantity clamping, totals
//! - **Checkout**: shipping validation and the delivery pincode allow-list
//! - **Orders**: immutable order snapshots and the status workflow
//! - **Reviews**: rated product reviews
//!
//! # Example
//!
//! ```rust
//! use nest_commerce::prelude::*;
//!
//! let mut product = Product::new("d1", "Diapers", "Baby Care", "Diapers");
//! product.variants.push(Variant::sized("M", Money::from_rupees(499), Money::from_rupees(399), 20));
//!
//! let mut cart = Cart::new();
//! let line = cart.add(&product, &product.variants[0]);
//! cart.add(&product, &product.variants[0]);
//!
//! assert_eq!(cart.get(&line).map(|l| l.qty), Some(2));
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod ids;
pub mod money;
pub mod order;
pub mod review;

pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        recommendations, CatalogFilter, Product, SortOrder, Variant, ALL_FILTER,
        RECOMMENDATION_LIMIT,
    };

    // Cart
    pub use crate::cart::{line_id, Cart, CartError, CartLine};

    // Checkout
    pub use crate::checkout::{
        validate_shipping, CheckoutError, PaymentMode, ShippingDetails, SERVICEABLE_PINCODES,
    };

    // Orders
    pub use crate::order::{Order, OrderStatus, StatusBadge};

    // Reviews
    pub use crate::review::{Review, ReviewError, MAX_RATING, MIN_RATING};
}
