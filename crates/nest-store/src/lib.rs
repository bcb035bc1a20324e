//! Path-addressed JSON document store with live collection snapshots.
//!
//! Process-local stand-in for the managed document database the
//! storefront delegates persistence to. Documents are flat JSON
//! objects addressed by `collection/doc` paths, with nesting for
//! per-user sub-collections (`users/{uid}/cart/{lineId}`).
//!
//! Every mutation under a collection re-publishes the collection's
//! full authoritative snapshot to its watchers — the "snapshot echo"
//! that keeps client-side projections in sync.
//!
//! # Example
//!
//! ```rust
//! use nest_store::{paths, DocPath, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let cart = paths::user_cart("u1");
//! let mut watcher = store.watch(&cart);
//!
//! store.set(&DocPath::in_collection(&cart, "d1-M"), &42).unwrap();
//!
//! let snapshot = watcher.latest().unwrap();
//! assert_eq!(snapshot.len(), 1);
//! ```

mod batch;
mod error;
mod path;
mod store;
mod watch;

pub use batch::WriteBatch;
pub use error::StoreError;
pub use path::{paths, CollectionPath, DocPath};
pub use store::MemoryStore;
pub use watch::{Snapshot, Watcher};
