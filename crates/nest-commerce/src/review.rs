//! Product reviews.

use crate::ids::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

/// Errors from review construction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    /// Rating outside the 1..=5 range.
    #[error("rating {0} out of range ({MIN_RATING}..={MAX_RATING})")]
    InvalidRating(i32),

    /// Review text is empty.
    #[error("review text is empty")]
    EmptyText,
}

/// A product review.
///
/// Any authenticated user can submit one; the UI only offers the
/// action after a delivered order, but nothing here ties a review to a
/// purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Product the review is about (short code).
    pub product_id: ProductId,
    /// Author.
    pub user_id: UserId,
    /// Author display name at submission time.
    pub user_name: String,
    /// Rating, 1..=5.
    pub rating: i32,
    /// Free text.
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl Review {
    /// Build a validated review.
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        user_name: impl Into<String>,
        rating: i32,
        text: impl Into<String>,
    ) -> Result<Self, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReviewError::EmptyText);
        }

        Ok(Self {
            id: ReviewId::generate(),
            product_id,
            user_id,
            user_name: user_name.into(),
            rating,
            text,
            created_at: crate::order::current_millis(),
        })
    }
}
