//! InMemoryStore - Map-backed store client for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use ulid::Ulid;

use super::{StoreClient, StoreError};
use crate::record::Record;

/// In-memory store client backed by one ordered map per location.
///
/// Keys are ULIDs, so iteration order follows generation time the way a
/// remote store's index order would. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<BTreeMap<String, BTreeMap<String, Record>>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl StoreClient for InMemoryStore {
    fn fetch(&self, location: &str, key: &str) -> Result<Option<Record>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(collections
            .get(location)
            .and_then(|records| records.get(key))
            .cloned())
    }

    fn fetch_all(&self, location: &str) -> Result<Vec<(String, Record)>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(collections
            .get(location)
            .map(|records| {
                records
                    .iter()
                    .map(|(key, record)| (key.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fetch_by_attr(
        &self,
        location: &str,
        attr: &str,
        value: &Value,
    ) -> Result<Vec<(String, Record)>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(collections
            .get(location)
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, record)| record.get(attr) == Some(value))
                    .map(|(key, record)| (key.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn generate_key(&self, _location: &str) -> String {
        Ulid::new().to_string()
    }

    fn merge(&self, location: &str, key: &str, data: &Record) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        let record = collections
            .entry(location.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default();

        for (field, value) in data.iter() {
            record.insert(field.clone(), value.clone());
        }

        Ok(())
    }

    fn remove(&self, location: &str, key: &str) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if let Some(records) = collections.get_mut(location) {
            records.remove(key);
        }

        Ok(())
    }
}
