//! The in-memory document store.

use crate::batch::WriteOp;
use crate::{CollectionPath, DocPath, Snapshot, StoreError, Watcher, WriteBatch};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of each collection's notification channel. Snapshots carry
/// full state, so a lagged watcher only ever needs the newest one.
const WATCH_CHANNEL_CAPACITY: usize = 16;

#[derive(Default)]
struct Collection {
    /// Documents in insertion order; a set on an existing id replaces
    /// in place.
    entries: Vec<(String, Value)>,
}

impl Collection {
    fn upsert(&mut self, doc_id: &str, doc: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| id == doc_id) {
            entry.1 = doc;
        } else {
            self.entries.push((doc_id.to_string(), doc));
        }
    }

    fn remove(&mut self, doc_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| id != doc_id);
        self.entries.len() < before
    }

    fn get(&self, doc_id: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(id, _)| id == doc_id)
            .map(|(_, doc)| doc)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.entries.clone())
    }
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Collection>,
    channels: HashMap<String, broadcast::Sender<Snapshot>>,
}

impl Inner {
    fn publish(&mut self, collection: &str) {
        if let Some(tx) = self.channels.get(collection) {
            let snapshot = self
                .collections
                .get(collection)
                .map(Collection::snapshot)
                .unwrap_or_default();
            // Nobody listening is fine.
            let _ = tx.send(snapshot);
        }
    }
}

/// Process-local document store.
///
/// Cheap to clone; clones share the same underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write a document, replacing any existing one at the path.
    pub fn set<T: Serialize>(&self, path: &DocPath, doc: &T) -> Result<(), StoreError> {
        let doc = serde_json::to_value(doc)?;
        let collection = path.collection();

        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.as_str().to_string())
            .or_default()
            .upsert(path.doc_id(), doc);
        inner.publish(collection.as_str());

        debug!(path = %path, "document written");
        Ok(())
    }

    /// Read a document. Missing documents are `None`.
    pub fn get<T: DeserializeOwned>(&self, path: &DocPath) -> Result<Option<T>, StoreError> {
        let inner = self.lock();
        let doc = inner
            .collections
            .get(path.collection().as_str())
            .and_then(|c| c.get(path.doc_id()))
            .cloned();
        drop(inner);

        doc.map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .transpose()
    }

    /// Delete a document. Returns whether anything was removed.
    pub fn delete(&self, path: &DocPath) -> bool {
        let collection = path.collection();

        let mut inner = self.lock();
        let removed = inner
            .collections
            .get_mut(collection.as_str())
            .map(|c| c.remove(path.doc_id()))
            .unwrap_or(false);
        if removed {
            inner.publish(collection.as_str());
            debug!(path = %path, "document deleted");
        }
        removed
    }

    /// List a collection's documents in insertion order.
    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &CollectionPath,
    ) -> Result<Vec<(String, T)>, StoreError> {
        let snapshot = {
            let inner = self.lock();
            inner
                .collections
                .get(collection.as_str())
                .map(Collection::snapshot)
                .unwrap_or_default()
        };
        snapshot.documents()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &CollectionPath) -> usize {
        let inner = self.lock();
        inner
            .collections
            .get(collection.as_str())
            .map(|c| c.entries.len())
            .unwrap_or(0)
    }

    /// Apply a batch atomically: every operation lands under one lock,
    /// and each touched collection publishes a single snapshot after
    /// the whole batch.
    pub fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let mut touched: Vec<String> = Vec::new();

        for op in batch.ops {
            let collection = match &op {
                WriteOp::Set { path, .. } | WriteOp::Delete { path } => path.collection(),
            };
            if !touched.contains(&collection.as_str().to_string()) {
                touched.push(collection.as_str().to_string());
            }

            match op {
                WriteOp::Set { path, doc } => {
                    inner
                        .collections
                        .entry(collection.as_str().to_string())
                        .or_default()
                        .upsert(path.doc_id(), doc);
                }
                WriteOp::Delete { path } => {
                    if let Some(c) = inner.collections.get_mut(collection.as_str()) {
                        c.remove(path.doc_id());
                    }
                }
            }
        }

        for collection in &touched {
            inner.publish(collection);
        }

        debug!(collections = touched.len(), "batch applied");
        Ok(())
    }

    /// Subscribe to a collection's snapshots.
    ///
    /// The current snapshot is published immediately so a new watcher
    /// starts from the authoritative state; snapshots are full state,
    /// so the redundant echo other watchers see is harmless.
    pub fn watch(&self, collection: &CollectionPath) -> Watcher {
        let mut inner = self.lock();
        let rx = inner
            .channels
            .entry(collection.as_str().to_string())
            .or_insert_with(|| broadcast::channel(WATCH_CHANNEL_CAPACITY).0)
            .subscribe();
        inner.publish(collection.as_str());
        Watcher::new(rx)
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryStore")
            .field("collections", &inner.collections.len())
            .finish()
    }
}
