//! ModelBase - CRUD façade over one collection in a remote document store.
//!
//! A `ModelBase` binds a collection (display name + store location) to a
//! store client, an identity provider, and a clock. Reads enrich records
//! with their addressing key; writes stamp provenance fields and filter
//! derived fields; every successful mutation fires the binding's change
//! signal. Concrete entity models each own one binding.
//!
//! ## Example
//!
//! ```ignore
//! use supermodel::{InMemoryStore, ModelBase, Record, StaticIdentity};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let tasks = ModelBase::new("Task", "app/tasks", store)
//!     .with_identity(StaticIdentity("user1".into()));
//!
//! tasks.on_change(|| println!("tasks changed"));
//!
//! let key = tasks.create(Record::from_value(json!({"name": "A"})).unwrap())?;
//! let task = tasks.get(&key)?;
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::changes::ChangeSignal;
use crate::clock::{Clock, SystemClock};
use crate::error::ModelError;
use crate::identity::{Anonymous, IdentityProvider};
use crate::record::{self, Record};
use crate::store::StoreClient;

/// Model base bound to a single collection.
///
/// The binding (name, location, collaborators) is set at construction and
/// never mutated; the change signal is the only interior state.
pub struct ModelBase<S> {
    name: String,
    location: String,
    store: Arc<S>,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    changes: ChangeSignal,
}

impl<S: StoreClient> ModelBase<S> {
    /// Bind a model base to one collection. `name` is the human-readable
    /// label used in error messages; `location` is the collection's path in
    /// the store's addressing scheme.
    ///
    /// Defaults to no authenticated identity and the system clock; override
    /// with [`with_identity`](Self::with_identity) and
    /// [`with_clock`](Self::with_clock).
    pub fn new(name: impl Into<String>, location: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            store,
            identity: Arc::new(Anonymous),
            clock: Arc::new(SystemClock),
            changes: ChangeSignal::new(),
        }
    }

    /// Use an explicit identity provider for provenance stamping.
    pub fn with_identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    /// Use an explicit clock for provenance stamping.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The collection's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The collection's location in the store.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// This binding's change signal.
    pub fn changes(&self) -> &ChangeSignal {
        &self.changes
    }

    /// Register a handler fired after every successful create or update and
    /// after every issued destroy. Delivery is synchronous; handlers must
    /// not block.
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.changes.subscribe(listener);
    }

    /// Fetch one record by key. Exactly one remote read, no retries.
    ///
    /// The returned record carries its addressing key in the `key` field.
    /// A missing record is `ModelError::NotFound`; store failures are
    /// surfaced unchanged.
    pub fn get(&self, key: &str) -> Result<Record, ModelError> {
        match self.store.fetch(&self.location, key)? {
            Some(mut item) => {
                item.set_key(key);
                Ok(item)
            }
            None => Err(ModelError::NotFound {
                model: self.name.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Every record whose field `attr` exactly equals `value`, each enriched
    /// with its key. Zero matches yields an empty vec, not an error. Order
    /// follows the store's index ordering; don't rely on it.
    pub fn get_all_with_attr_value(
        &self,
        attr: &str,
        value: &Value,
    ) -> Result<Vec<Record>, ModelError> {
        let items = self.store.fetch_by_attr(&self.location, attr, value)?;
        Ok(Self::with_keys(items))
    }

    /// Every record in the collection, each enriched with its key.
    ///
    /// The whole collection is materialized in memory; suitable only for
    /// bounded collection sizes.
    pub fn get_all(&self) -> Result<Vec<Record>, ModelError> {
        let items = self.store.fetch_all(&self.location)?;
        Ok(Self::with_keys(items))
    }

    /// Persist a new record under a freshly generated key and return that
    /// key. Stamps `created_by` (the current identity, or null) and
    /// `created_on` before writing. The change signal fires only after the
    /// store confirms the write.
    pub fn create(&self, mut data: Record) -> Result<String, ModelError> {
        self.stamp(&mut data, record::CREATED_BY, record::CREATED_ON);

        let key = self.store.generate_key(&self.location);
        self.store.merge(&self.location, &key, &data)?;

        debug!(collection = %self.name, key = %key, "created record");
        self.changes.emit();
        Ok(key)
    }

    /// Merge fields into the record at `key` and return the key. Fields not
    /// present in `data` are left untouched in the store.
    ///
    /// Stamps `updated_by`/`updated_on`, then strips the `key` field and
    /// every derived (`_`-prefixed) field from the payload before writing.
    /// A store-reported write failure surfaces as an error and fires no
    /// change signal.
    pub fn update(&self, key: &str, mut data: Record) -> Result<String, ModelError> {
        self.stamp(&mut data, record::UPDATED_BY, record::UPDATED_ON);

        data.strip_key();
        data.strip_derived();

        self.store.merge(&self.location, key, &data)?;

        debug!(collection = %self.name, key = %key, "updated record");
        self.changes.emit();
        Ok(key.to_string())
    }

    /// Remove the record at `key`, fire-and-forget.
    ///
    /// The store's outcome is not reported to the caller; the change signal
    /// fires unconditionally once the removal has been issued. Callers must
    /// not assume the remote deletion is complete when this returns —
    /// re-query on change if freshness matters. Destroying an absent key is
    /// a visible no-op that still fires the signal.
    pub fn destroy(&self, key: &str) {
        if let Err(err) = self.store.remove(&self.location, key) {
            warn!(collection = %self.name, key = %key, error = %err, "destroy failure ignored");
        }

        debug!(collection = %self.name, key = %key, "destroyed record");
        self.changes.emit();
    }

    fn stamp(&self, data: &mut Record, by_field: &str, on_field: &str) {
        let actor = self
            .identity
            .current_identity()
            .map_or(Value::Null, Value::String);
        data.insert(by_field, actor);
        data.insert(on_field, Value::String(self.clock.now()));
    }

    fn with_keys(items: Vec<(String, Record)>) -> Vec<Record> {
        items
            .into_iter()
            .map(|(key, mut item)| {
                item.set_key(&key);
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::identity::StaticIdentity;
    use crate::store::{InMemoryStore, StoreError};
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn tasks() -> ModelBase<InMemoryStore> {
        ModelBase::new("Task", "app/tasks", Arc::new(InMemoryStore::new()))
            .with_identity(StaticIdentity("user1".to_string()))
            .with_clock(FixedClock("2026-08-24T12:00:00Z".to_string()))
    }

    #[test]
    fn get_injects_key() {
        let model = tasks();
        let key = model.create(record(json!({"name": "A"}))).unwrap();

        let item = model.get(&key).unwrap();
        assert_eq!(item.key(), Some(key.as_str()));
        assert_eq!(item.get("name"), Some(&json!("A")));
    }

    #[test]
    fn get_missing_names_collection_and_key() {
        let model = tasks();
        let err = model.get("nope").unwrap_err();

        assert!(matches!(err, ModelError::NotFound { .. }));
        let message = err.to_string();
        assert!(message.contains("Task"));
        assert!(message.contains("nope"));
    }

    #[test]
    fn create_stamps_provenance() {
        let model = tasks();
        let key = model.create(record(json!({"name": "A"}))).unwrap();

        let item = model.get(&key).unwrap();
        assert_eq!(item.get("created_by"), Some(&json!("user1")));
        assert_eq!(item.get("created_on"), Some(&json!("2026-08-24T12:00:00Z")));
    }

    #[test]
    fn create_without_identity_stamps_null() {
        let store = Arc::new(InMemoryStore::new());
        let model = ModelBase::new("Task", "app/tasks", store)
            .with_clock(FixedClock("2026-08-24T12:00:00Z".to_string()));

        let key = model.create(record(json!({"name": "A"}))).unwrap();
        let item = model.get(&key).unwrap();
        assert_eq!(item.get("created_by"), Some(&Value::Null));
    }

    #[test]
    fn update_merges_and_filters() {
        let model = tasks();
        let key = model
            .create(record(json!({"name": "A", "status": "open"})))
            .unwrap();

        let returned = model
            .update(
                &key,
                record(json!({"_cache": "x", "key": "other", "name": "B"})),
            )
            .unwrap();
        assert_eq!(returned, key);

        let item = model.get(&key).unwrap();
        assert_eq!(item.get("name"), Some(&json!("B")));
        assert_eq!(item.get("status"), Some(&json!("open")));
        assert!(!item.contains("_cache"));
        assert_eq!(item.key(), Some(key.as_str()));
        assert_eq!(item.get("updated_by"), Some(&json!("user1")));
        assert_eq!(item.get("updated_on"), Some(&json!("2026-08-24T12:00:00Z")));
    }

    #[test]
    fn destroy_removes_and_is_idempotent() {
        let model = tasks();
        let key = model.create(record(json!({"name": "A"}))).unwrap();

        model.destroy(&key);
        assert!(matches!(
            model.get(&key),
            Err(ModelError::NotFound { .. })
        ));

        model.destroy(&key);
    }

    struct DownStore;

    impl StoreClient for DownStore {
        fn fetch(&self, _: &str, _: &str) -> Result<Option<Record>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        fn fetch_all(&self, _: &str) -> Result<Vec<(String, Record)>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        fn fetch_by_attr(
            &self,
            _: &str,
            _: &str,
            _: &Value,
        ) -> Result<Vec<(String, Record)>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        fn generate_key(&self, _: &str) -> String {
            "generated".to_string()
        }
        fn merge(&self, _: &str, _: &str, _: &Record) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        fn remove(&self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    #[test]
    fn store_failures_surface_unchanged() {
        let model = ModelBase::new("Task", "app/tasks", Arc::new(DownStore));

        let err = model.get("a").unwrap_err();
        assert_eq!(
            err,
            ModelError::Store(StoreError::Unavailable("down".into()))
        );

        assert!(model.get_all().is_err());
        assert!(model
            .get_all_with_attr_value("status", &json!("open"))
            .is_err());
        assert!(model.create(Record::new()).is_err());
        assert!(model.update("a", Record::new()).is_err());
    }
}
