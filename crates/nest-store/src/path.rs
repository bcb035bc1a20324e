//! Collection and document paths.
//!
//! Paths are slash-separated: an odd number of segments addresses a
//! collection (`products`, `users/u1/cart`), an even number addresses
//! a document (`products/p1`, `users/u1/cart/d1-M`).

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parse a collection path.
    pub fn new(path: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let segments = validate_segments(&path)?;
        if segments % 2 == 0 {
            return Err(StoreError::InvalidPath(format!(
                "{path} addresses a document, not a collection"
            )));
        }
        Ok(Self(path))
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocPath(String);

impl DocPath {
    /// Parse a document path.
    pub fn parse(path: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let segments = validate_segments(&path)?;
        if segments % 2 != 0 {
            return Err(StoreError::InvalidPath(format!(
                "{path} addresses a collection, not a document"
            )));
        }
        Ok(Self(path))
    }

    /// Address a document inside a collection.
    pub fn in_collection(collection: &CollectionPath, doc_id: impl AsRef<str>) -> Self {
        Self(format!("{}/{}", collection.as_str(), doc_id.as_ref()))
    }

    /// The collection this document lives in.
    pub fn collection(&self) -> CollectionPath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => CollectionPath(parent.to_string()),
            // Unreachable for a parsed DocPath; kept total.
            None => CollectionPath(self.0.clone()),
        }
    }

    /// The final path segment.
    pub fn doc_id(&self) -> &str {
        self.0.rsplit_once('/').map(|(_, id)| id).unwrap_or(&self.0)
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_segments(path: &str) -> Result<usize, StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(format!(
            "empty segment in {path:?}"
        )));
    }
    Ok(segments.len())
}

/// The collections the storefront uses.
pub mod paths {
    use super::{CollectionPath, DocPath};

    /// `products` collection.
    pub fn products() -> CollectionPath {
        CollectionPath("products".to_string())
    }

    /// `users` collection.
    pub fn users() -> CollectionPath {
        CollectionPath("users".to_string())
    }

    /// `users/{uid}` profile document.
    pub fn user(uid: &str) -> DocPath {
        DocPath(format!("users/{uid}"))
    }

    /// `users/{uid}/cart` sub-collection.
    pub fn user_cart(uid: &str) -> CollectionPath {
        CollectionPath(format!("users/{uid}/cart"))
    }

    /// `users/{uid}/orders` sub-collection.
    pub fn user_orders(uid: &str) -> CollectionPath {
        CollectionPath(format!("users/{uid}/orders"))
    }

    /// `productReviews` collection.
    pub fn product_reviews() -> CollectionPath {
        CollectionPath("productReviews".to_string())
    }

    /// `auditLog` collection.
    pub fn audit_log() -> CollectionPath {
        CollectionPath("auditLog".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path_parity() {
        assert!(CollectionPath::new("products").is_ok());
        assert!(CollectionPath::new("users/u1/cart").is_ok());
        assert!(CollectionPath::new("products/p1").is_err());
    }

    #[test]
    fn test_doc_path_parity() {
        assert!(DocPath::parse("products/p1").is_ok());
        assert!(DocPath::parse("users/u1/cart/d1-M").is_ok());
        assert!(DocPath::parse("products").is_err());
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(DocPath::parse("products//p1").is_err());
        assert!(CollectionPath::new("").is_err());
    }

    #[test]
    fn test_doc_path_components() {
        let doc = DocPath::in_collection(&paths::user_cart("u1"), "d1-M");
        assert_eq!(doc.as_str(), "users/u1/cart/d1-M");
        assert_eq!(doc.doc_id(), "d1-M");
        assert_eq!(doc.collection(), paths::user_cart("u1"));
    }

    #[test]
    fn test_user_doc_path() {
        assert_eq!(paths::user("u1").as_str(), "users/u1");
        assert_eq!(paths::user("u1").collection(), paths::users());
    }
}
