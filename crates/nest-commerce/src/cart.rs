//! Shopping cart with per-variant line identity.
//!
//! A cart line is identified by the product's short code plus a variant
//! discriminator (size, else flavour, else `default`). Adding the same
//! product/variant again merges into the existing line instead of
//! duplicating it.

use crate::catalog::{Product, Variant};
use crate::ids::{LineId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from cart operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    /// Line not present in the cart.
    #[error("line not in cart: {0}")]
    LineNotFound(LineId),

    /// Arithmetic overflow computing a total.
    #[error("arithmetic overflow in cart total")]
    Overflow,
}

/// Derive the cart-line identity for a product/variant pair.
pub fn line_id(product: &Product, variant: &Variant) -> LineId {
    LineId::new(format!("{}-{}", product.id, variant.discriminator()))
}

/// One line of the cart.
///
/// Display fields and the unit price are snapshots taken at add time;
/// a later catalog edit does not re-sync them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Derived identity, see [`line_id`].
    pub id: LineId,
    /// Short code of the product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Display image at add time.
    pub image: String,
    /// The chosen variant, copied.
    pub variant: Variant,
    /// Offer price at add time.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub qty: i64,
}

impl CartLine {
    /// Build a fresh line (qty 1) for a product/variant pair.
    pub fn new(product: &Product, variant: &Variant) -> Self {
        Self {
            id: line_id(product, variant),
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.display_image().to_string(),
            variant: variant.clone(),
            unit_price: variant.offer_price,
            qty: 1,
        }
    }

    /// Line total (unit price times quantity).
    pub fn total(&self) -> Result<Money, CartError> {
        self.unit_price
            .try_multiply(self.qty)
            .ok_or(CartError::Overflow)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines (e.g. a collection snapshot).
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Add one unit of a product variant.
    ///
    /// If a line with the same derived identity exists its quantity is
    /// incremented by 1; otherwise a new line is created with qty 1 and
    /// the variant's offer price snapshotted as the unit price.
    pub fn add(&mut self, product: &Product, variant: &Variant) -> LineId {
        let id = line_id(product, variant);

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == id) {
            existing.qty += 1;
            return id;
        }

        self.lines.push(CartLine::new(product, variant));
        id
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    ///
    /// No maximum is enforced and the quantity is not checked against
    /// variant stock.
    pub fn set_qty(&mut self, id: &LineId, qty: i64) -> Result<(), CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CartError::LineNotFound(id.clone()))?;
        line.qty = qty.max(1);
        Ok(())
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove(&mut self, id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() < before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get a line by id.
    pub fn get(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    /// Cart total: sum of unit price times quantity over all lines.
    pub fn total(&self) -> Result<Money, CartError> {
        let mut total = Money::zero();
        for line in &self.lines {
            total = total.try_add(line.total()?).ok_or(CartError::Overflow)?;
        }
        Ok(total)
    }
}
