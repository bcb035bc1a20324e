//! Admin command log.
//!
//! Every state-changing admin action appends one entry describing who
//! did what to which document. Entries are append-only; nothing in the
//! storefront ever edits or deletes them.

use crate::StorefrontError;
use nest_auth::Session;
use nest_commerce::ids::DocId;
use nest_commerce::prelude::UserId;
use nest_store::{paths, DocPath, MemoryStore};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One recorded admin action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// Entry ID.
    pub id: DocId,
    /// Admin who acted.
    pub actor: UserId,
    /// Actor's email at the time.
    pub actor_email: String,
    /// Action name, e.g. `product.update`.
    pub action: String,
    /// Document or entity acted on.
    pub target: String,
    /// Unix timestamp in milliseconds.
    pub at: i64,
}

/// Appends to and reads the `auditLog` collection.
#[derive(Clone)]
pub struct AuditLog {
    store: MemoryStore,
}

impl AuditLog {
    /// Create a log over a store.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Append one entry.
    pub fn record(
        &self,
        session: &Session,
        action: &str,
        target: impl Into<String>,
    ) -> Result<AuditEntry, StorefrontError> {
        let entry = AuditEntry {
            id: DocId::generate(),
            actor: session.user_id.clone(),
            actor_email: session.email.clone(),
            action: action.to_string(),
            target: target.into(),
            at: current_millis(),
        };
        let path = DocPath::in_collection(&paths::audit_log(), entry.id.as_str());
        self.store.set(&path, &entry)?;
        Ok(entry)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Result<Vec<AuditEntry>, StorefrontError> {
        let docs: Vec<(String, AuditEntry)> = self.store.list(&paths::audit_log())?;
        Ok(docs.into_iter().map(|(_, e)| e).collect())
    }
}

fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
