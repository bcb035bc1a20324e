//! Orders and the status workflow.

use crate::cart::CartLine;
use crate::checkout::{PaymentMode, ShippingDetails};
use crate::ids::OrderId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status.
///
/// The intended progression is `Pending → Packed → Out for Delivery →
/// Delivered`, with cancellation possible while still in the first two
/// states. Nothing validates transitions beyond [`OrderStatus::can_cancel`];
/// the admin screens may write any status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting packing.
    #[default]
    Pending,
    /// Order packed.
    Packed,
    /// Order out for delivery.
    OutForDelivery,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// The display string, which is also what order documents store.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Packed => "Packed",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Packed" => Some(OrderStatus::Packed),
            "Out for Delivery" => Some(OrderStatus::OutForDelivery),
            "Delivered" => Some(OrderStatus::Delivered),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// All statuses in workflow order.
    pub fn all() -> [OrderStatus; 5] {
        [
            OrderStatus::Pending,
            OrderStatus::Packed,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
    }

    /// Cancellation is offered only before the order leaves the shop.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Packed)
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The "write a review" action is offered only after delivery.
    pub fn allows_review(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

/// Visual bucket for the status badge.
///
/// The mapping is total: unrecognised status strings land in
/// [`StatusBadge::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBadge {
    Pending,
    Packed,
    OutForDelivery,
    Delivered,
    Cancelled,
    Unknown,
}

impl StatusBadge {
    /// Map a stored status string to its badge bucket.
    pub fn for_status(status: &str) -> Self {
        match OrderStatus::parse(status) {
            Some(OrderStatus::Pending) => StatusBadge::Pending,
            Some(OrderStatus::Packed) => StatusBadge::Packed,
            Some(OrderStatus::OutForDelivery) => StatusBadge::OutForDelivery,
            Some(OrderStatus::Delivered) => StatusBadge::Delivered,
            Some(OrderStatus::Cancelled) => StatusBadge::Cancelled,
            None => StatusBadge::Unknown,
        }
    }

    /// Badge colour name.
    pub fn color(&self) -> &'static str {
        match self {
            StatusBadge::Pending => "yellow",
            StatusBadge::Packed => "orange",
            StatusBadge::OutForDelivery => "blue",
            StatusBadge::Delivered => "green",
            StatusBadge::Cancelled => "red",
            StatusBadge::Unknown => "gray",
        }
    }
}

/// A placed order.
///
/// An immutable snapshot taken at checkout: the item list and amount
/// are copied, never recomputed. Only the status (and its cancellation
/// timestamp) changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Creation timestamp in milliseconds, as a decimal string.
    pub id: OrderId,
    /// Deep copy of the cart lines at checkout time.
    pub items: Vec<CartLine>,
    /// Total computed at checkout time.
    pub amount: Money,
    /// Payment method (always cash on delivery).
    pub payment_mode: PaymentMode,
    /// Shipping details as entered.
    pub shipping: ShippingDetails,
    /// Current status.
    pub status: OrderStatus,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
    /// Unix timestamp in milliseconds when cancelled, if ever.
    pub cancelled_at: Option<i64>,
}

impl Order {
    /// Build an order snapshot from cart lines.
    pub fn new(items: Vec<CartLine>, amount: Money, shipping: ShippingDetails) -> Self {
        let now = current_millis();
        Self {
            id: OrderId::new(now.to_string()),
            items,
            amount,
            payment_mode: shipping.payment_mode,
            shipping,
            status: OrderStatus::Pending,
            created_at: now,
            cancelled_at: None,
        }
    }

    /// Total unit count across items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Cancel the order if it has not progressed past packing.
    ///
    /// Returns whether the cancellation was applied.
    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(current_millis());
        true
    }

    /// Overwrite the status. No transition validation.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

/// Current Unix timestamp in milliseconds.
pub(crate) fn current_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            Vec::new(),
            Money::from_rupees(250),
            ShippingDetails::new("Asha", "9876543210", "12 Main Rd", "442001"),
        )
    }

    #[test]
    fn test_cancel_allowed_early() {
        let mut o = order();
        assert!(o.cancel());
        assert_eq!(o.status, OrderStatus::Cancelled);
        assert!(o.cancelled_at.is_some());
    }

    #[test]
    fn test_cancel_blocked_after_packing() {
        for status in [
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let mut o = order();
            o.set_status(status);
            assert!(!o.cancel(), "{status:?} should not be cancellable");
        }

        let mut o = order();
        o.set_status(OrderStatus::Packed);
        assert!(o.cancel());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in OrderStatus::all() {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_review_only_after_delivery() {
        assert!(OrderStatus::Delivered.allows_review());
        assert!(!OrderStatus::Pending.allows_review());
        assert!(!OrderStatus::Cancelled.allows_review());
    }

    #[test]
    fn test_badge_mapping_is_total() {
        assert_eq!(StatusBadge::for_status("Pending"), StatusBadge::Pending);
        assert_eq!(
            StatusBadge::for_status("Out for Delivery"),
            StatusBadge::OutForDelivery
        );
        assert_eq!(StatusBadge::for_status("Delivered"), StatusBadge::Delivered);
        // Anything unrecognised maps to the default bucket, never panics.
        assert_eq!(StatusBadge::for_status("Shipped"), StatusBadge::Unknown);
        assert_eq!(StatusBadge::for_status(""), StatusBadge::Unknown);
        assert_eq!(StatusBadge::for_status("").color(), "gray");
    }

    #[test]
    fn test_order_id_is_millis_string() {
        let o = order();
        assert_eq!(o.id.as_str(), o.created_at.to_string());
    }
}
