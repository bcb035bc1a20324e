//! Money type for rupee amounts.
//!
//! The store trades in a single currency (INR). Amounts are held in
//! paise to avoid floating-point precision issues in totals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rupee amount in paise.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in paise (1 rupee = 100 paise).
    pub paise: i64,
}

impl Money {
    /// Create a Money value from paise.
    pub fn from_paise(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a Money value from whole rupees.
    ///
    /// ```
    /// use nest_commerce::Money;
    /// assert_eq!(Money::from_rupees(399).paise, 39_900);
    /// ```
    pub fn from_rupees(rupees: i64) -> Self {
        Self {
            paise: rupees.saturating_mul(100),
        }
    }

    /// The zero amount.
    pub fn zero() -> Self {
        Self { paise: 0 }
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    /// Whole-rupee part of the amount.
    pub fn rupees(&self) -> i64 {
        self.paise / 100
    }

    /// Try to add another amount, returning `None` on overflow.
    pub fn try_add(&self, other: Money) -> Option<Money> {
        self.paise.checked_add(other.paise).map(Money::from_paise)
    }

    /// Try to multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.paise.checked_mul(factor).map(Money::from_paise)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn try_sum(mut iter: impl Iterator<Item = Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.paise % 100 == 0 {
            write!(f, "\u{20b9}{}", self.paise / 100)
        } else {
            write!(f, "\u{20b9}{}.{:02}", self.paise / 100, self.paise % 100)
        }
    }
}
