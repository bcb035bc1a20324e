//! Admin console operations.
//!
//! Every method gates on an administrator session and records what it
//! did in the [`AuditLog`].

use crate::{AppContext, AuditLog, StorefrontError};
use nest_auth::Account;
use nest_commerce::ids::DocId;
use nest_commerce::prelude::{Order, OrderId, OrderStatus, Product, ReviewId, UserId};
use nest_store::{paths, DocPath};
use tracing::info;

/// Catalog, order, user, and review management.
pub struct AdminService {
    ctx: AppContext,
    audit: AuditLog,
}

impl AdminService {
    /// Create an admin service.
    pub fn new(ctx: AppContext) -> Self {
        let audit = AuditLog::new(ctx.store().clone());
        Self { ctx, audit }
    }

    /// The command log.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Add a product under a fresh document ID.
    pub fn add_product(&self, product: &Product) -> Result<DocId, StorefrontError> {
        let session = self.ctx.require_admin()?;
        let doc_id = DocId::generate();
        let path = DocPath::in_collection(&paths::products(), doc_id.as_str());
        self.ctx.store().set(&path, product)?;
        self.audit
            .record(session, "product.create", path.as_str())?;

        info!(product = %product.id, doc = %doc_id, "product added");
        Ok(doc_id)
    }

    /// Replace a product document wholesale.
    pub fn update_product(&self, doc_id: &str, product: &Product) -> Result<(), StorefrontError> {
        let session = self.ctx.require_admin()?;
        let path = DocPath::in_collection(&paths::products(), doc_id);
        if self.ctx.store().get::<Product>(&path)?.is_none() {
            return Err(StorefrontError::ProductNotFound(doc_id.to_string()));
        }
        self.ctx.store().set(&path, product)?;
        self.audit
            .record(session, "product.update", path.as_str())?;
        Ok(())
    }

    /// Delete a product document.
    pub fn delete_product(&self, doc_id: &str) -> Result<(), StorefrontError> {
        let session = self.ctx.require_admin()?;
        let path = DocPath::in_collection(&paths::products(), doc_id);
        if !self.ctx.store().delete(&path) {
            return Err(StorefrontError::ProductNotFound(doc_id.to_string()));
        }
        self.audit
            .record(session, "product.delete", path.as_str())?;
        Ok(())
    }

    /// One user's orders, newest first.
    pub fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StorefrontError> {
        self.ctx.require_admin()?;
        let docs: Vec<(String, Order)> = self
            .ctx
            .store()
            .list(&paths::user_orders(user_id.as_str()))?;
        let mut orders: Vec<Order> = docs.into_iter().map(|(_, o)| o).collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    /// Overwrite an order's status. No transition validation: the
    /// console may move an order backwards or revive a cancelled one.
    pub fn set_order_status(
        &self,
        user_id: &UserId,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, StorefrontError> {
        let session = self.ctx.require_admin()?;
        let path = DocPath::in_collection(
            &paths::user_orders(user_id.as_str()),
            order_id.as_str(),
        );

        let mut order: Order = self
            .ctx
            .store()
            .get(&path)?
            .ok_or_else(|| StorefrontError::OrderNotFound(order_id.to_string()))?;
        order.set_status(status);
        self.ctx.store().set(&path, &order)?;
        self.audit.record(session, "order.status", path.as_str())?;

        info!(order = %order.id, status = status.as_str(), "order status set");
        Ok(order)
    }

    /// Every account with how many orders it has placed.
    pub fn users_with_order_counts(&self) -> Result<Vec<(Account, usize)>, StorefrontError> {
        self.ctx.require_admin()?;
        let accounts: Vec<(String, Account)> = self.ctx.store().list(&paths::users())?;
        Ok(accounts
            .into_iter()
            .map(|(_, account)| {
                let count = self
                    .ctx
                    .store()
                    .count(&paths::user_orders(account.id.as_str()));
                (account, count)
            })
            .collect())
    }

    /// Delete an account document. Orders and cart documents remain
    /// under the old ID but stop appearing in the user list.
    pub fn delete_user(&self, user_id: &UserId) -> Result<(), StorefrontError> {
        let session = self.ctx.require_admin()?;
        let path = paths::user(user_id.as_str());
        self.ctx.store().delete(&path);
        self.audit.record(session, "user.delete", path.as_str())?;
        Ok(())
    }

    /// Delete a review.
    pub fn delete_review(&self, review_id: &ReviewId) -> Result<(), StorefrontError> {
        let session = self.ctx.require_admin()?;
        let path = DocPath::in_collection(&paths::product_reviews(), review_id.as_str());
        self.ctx.store().delete(&path);
        self.audit.record(session, "review.delete", path.as_str())?;
        Ok(())
    }
}
