//! Store error types.

use thiserror::Error;

/// Errors from store operations.
///
/// Reading a missing document is `None`, not an error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A path segment was empty, or the path addressed the wrong kind
    /// of node (collection vs document).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A document failed to serialize or deserialize.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
