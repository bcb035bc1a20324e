//! Storefront error type.

use nest_auth::AuthError;
use nest_commerce::prelude::{CartError, CheckoutError, ReviewError};
use nest_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the storefront services.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// The operation needs a signed-in session.
    #[error("not signed in")]
    NotSignedIn,

    /// The operation needs an administrator session.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Cart domain error.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout validation error.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Review validation error.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Account or session error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Document store failure. Logged and surfaced, never retried.
    #[error("store error: {0}")]
    Remote(#[from] StoreError),

    /// No order with this ID for the signed-in user.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// The order has progressed past the point of cancellation.
    #[error("order can no longer be cancelled")]
    CannotCancel,

    /// No product with this ID.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Reviews open only once the order is delivered.
    #[error("order is not delivered yet")]
    ReviewNotAllowed,

    /// Configuration file problem.
    #[error("config error: {0}")]
    Config(String),

    /// Image upload failure.
    #[error("upload failed: {0}")]
    Upload(String),
}
