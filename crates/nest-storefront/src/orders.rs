//! Order history for the signed-in user.

use crate::{AppContext, StorefrontError};
use nest_commerce::prelude::{Order, OrderId};
use nest_store::{paths, DocPath};
use tracing::info;

/// Reads and cancels the session user's own orders. Status changes
/// beyond cancellation belong to [`crate::AdminService`].
pub struct OrderService {
    ctx: AppContext,
}

impl OrderService {
    /// Create an order service.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// The user's orders, newest first.
    pub fn my_orders(&self) -> Result<Vec<Order>, StorefrontError> {
        let session = self.ctx.require_session()?;
        let docs: Vec<(String, Order)> = self
            .ctx
            .store()
            .list(&paths::user_orders(session.user_id.as_str()))?;

        let mut orders: Vec<Order> = docs.into_iter().map(|(_, o)| o).collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    /// A single order by ID.
    pub fn get(&self, id: &OrderId) -> Result<Order, StorefrontError> {
        let session = self.ctx.require_session()?;
        let path = DocPath::in_collection(
            &paths::user_orders(session.user_id.as_str()),
            id.as_str(),
        );
        self.ctx
            .store()
            .get(&path)?
            .ok_or_else(|| StorefrontError::OrderNotFound(id.to_string()))
    }

    /// Cancel an order that has not progressed past packing.
    pub fn cancel(&self, id: &OrderId) -> Result<Order, StorefrontError> {
        let session = self.ctx.require_session()?;
        let path = DocPath::in_collection(
            &paths::user_orders(session.user_id.as_str()),
            id.as_str(),
        );

        let mut order: Order = self
            .ctx
            .store()
            .get(&path)?
            .ok_or_else(|| StorefrontError::OrderNotFound(id.to_string()))?;

        if !order.cancel() {
            return Err(StorefrontError::CannotCancel);
        }
        self.ctx.store().set(&path, &order)?;

        info!(order = %order.id, "order cancelled");
        Ok(order)
    }
}
