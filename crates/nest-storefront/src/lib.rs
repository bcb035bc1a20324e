//! Storefront and admin console services for Nestmart.
//!
//! Ties the pure domain types from `nest-commerce` to the document
//! store in `nest-store` and the accounts in `nest-auth`. Each service
//! takes an [`AppContext`] scoping it to one store and, optionally,
//! one signed-in session; nothing here reaches for global state.
//!
//! ```
//! use nest_storefront::{AppContext, AuthService, CartService, Catalog};
//! use nest_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let auth = AuthService::new(store.clone());
//! let session = auth.sign_up("Asha", "asha@example.com", "9422000000", "secret1")?;
//!
//! let ctx = AppContext::signed_in(store, session);
//! let cart = CartService::new(ctx.clone());
//! assert!(cart.cart().is_empty());
//! # Ok::<(), nest_storefront::StorefrontError>(())
//! ```

mod admin;
mod audit;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod config;
mod context;
mod error;
mod media;
mod orders;
mod reviews;

pub use admin::AdminService;
pub use audit::{AuditEntry, AuditLog};
pub use auth::AuthService;
pub use cart::CartService;
pub use catalog::Catalog;
pub use checkout::CheckoutService;
pub use config::{MediaConfig, StorefrontConfig};
pub use context::AppContext;
pub use error::StorefrontError;
pub use media::{CdnUploader, ImageHost};
pub use orders::OrderService;
pub use reviews::ReviewService;
