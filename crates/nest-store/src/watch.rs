//! Live collection snapshots.

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

/// The full authoritative contents of a collection at one moment.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    docs: Vec<(String, Value)>,
}

impl Snapshot {
    pub(crate) fn new(docs: Vec<(String, Value)>) -> Self {
        Self { docs }
    }

    /// Number of documents in the collection.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Raw documents in insertion order.
    pub fn docs(&self) -> &[(String, Value)] {
        &self.docs
    }

    /// Look up a document by id.
    pub fn get(&self, doc_id: &str) -> Option<&Value> {
        self.docs
            .iter()
            .find(|(id, _)| id == doc_id)
            .map(|(_, doc)| doc)
    }

    /// Deserialize every document, keeping insertion order.
    pub fn documents<T: DeserializeOwned>(&self) -> Result<Vec<(String, T)>, StoreError> {
        self.docs
            .iter()
            .map(|(id, doc)| Ok((id.clone(), serde_json::from_value(doc.clone())?)))
            .collect()
    }
}

/// A live subscription to one collection.
///
/// Every mutation under the collection publishes a fresh [`Snapshot`];
/// dropping the watcher tears the subscription down.
#[derive(Debug)]
pub struct Watcher {
    rx: broadcast::Receiver<Snapshot>,
}

impl Watcher {
    pub(crate) fn new(rx: broadcast::Receiver<Snapshot>) -> Self {
        Self { rx }
    }

    /// Drain pending notifications, returning the newest snapshot.
    ///
    /// `None` when nothing arrived since the last call. A lagged
    /// receiver skips straight to the retained notifications; only the
    /// newest snapshot matters since each carries the full state.
    pub fn latest(&mut self) -> Option<Snapshot> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => newest = Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        newest
    }

    /// Wait for the next snapshot.
    ///
    /// `None` when the store has been dropped.
    pub async fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
