//! Store - The remote document store's capability surface.
//!
//! A [`StoreClient`] is the narrow interface the model base needs from a
//! key-addressable document store: point reads, equality queries, full
//! scans, fresh-key generation, field-wise merge writes, and removal.
//! Networking, auth, and retry behavior all live behind this trait.

mod in_memory;

use std::fmt;

use serde_json::Value;

use crate::record::Record;

/// Error type for store client operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (network, timeout).
    Unavailable(String),
    /// The store refused the operation.
    PermissionDenied(String),
    /// Internal store failure.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            StoreError::PermissionDenied(msg) => write!(f, "store permission denied: {}", msg),
            StoreError::Backend(msg) => write!(f, "store backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Abstract client for a remote, schemaless, key-addressable document store.
///
/// `location` is a path in the store's addressing scheme; one location holds
/// one collection of records.
pub trait StoreClient: Send + Sync {
    /// Point read. Returns None if no record exists at the key.
    fn fetch(&self, location: &str, key: &str) -> Result<Option<Record>, StoreError>;

    /// Every record in the collection, paired with its key, in the store's
    /// index order.
    fn fetch_all(&self, location: &str) -> Result<Vec<(String, Record)>, StoreError>;

    /// Records whose field `attr` exactly equals `value`, paired with their
    /// keys, in the store's index order.
    fn fetch_by_attr(
        &self,
        location: &str,
        attr: &str,
        value: &Value,
    ) -> Result<Vec<(String, Record)>, StoreError>;

    /// A fresh key, unique within the collection.
    fn generate_key(&self, location: &str) -> String;

    /// Field-wise merge at `key`: fields present in `data` are written,
    /// everything else is left untouched. Creates the record if absent.
    fn merge(&self, location: &str, key: &str, data: &Record) -> Result<(), StoreError>;

    /// Remove the record at `key`. Removing an absent record is not an
    /// error.
    fn remove(&self, location: &str, key: &str) -> Result<(), StoreError>;
}

pub use in_memory::InMemoryStore;
