//! Atomic multi-document writes.

use crate::{DocPath, StoreError};
use serde::Serialize;
use serde_json::Value;

/// A single operation in a batch.
#[derive(Debug, Clone)]
pub(crate) enum WriteOp {
    Set { path: DocPath, doc: Value },
    Delete { path: DocPath },
}

/// A set of writes applied atomically by [`crate::MemoryStore::apply`].
///
/// Either every operation lands or none does; watchers observe one
/// snapshot per touched collection, after the whole batch.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    pub(crate) ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a document write.
    pub fn set<T: Serialize>(&mut self, path: DocPath, doc: &T) -> Result<&mut Self, StoreError> {
        let doc = serde_json::to_value(doc)?;
        self.ops.push(WriteOp::Set { path, doc });
        Ok(self)
    }

    /// Queue a document delete.
    pub fn delete(&mut self, path: DocPath) -> &mut Self {
        self.ops.push(WriteOp::Delete { path });
        self
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
