//! Record - A schemaless document and the fields this crate injects into it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field injected into every record returned by a read operation. Holds the
/// record's address in its collection and is never persisted as content.
pub const KEY_FIELD: &str = "key";

/// Identity of the actor that created the record, or JSON null.
pub const CREATED_BY: &str = "created_by";

/// ISO-8601-with-offset timestamp of record creation.
pub const CREATED_ON: &str = "created_on";

/// Identity of the actor behind the most recent update, or JSON null.
pub const UPDATED_BY: &str = "updated_by";

/// ISO-8601-with-offset timestamp of the most recent update.
pub const UPDATED_ON: &str = "updated_on";

/// Prefix marking a field as derived. Derived fields are computed elsewhere
/// and are never written through the update path.
pub const DERIVED_PREFIX: char = '_';

/// A schemaless document: field names mapped to JSON values.
///
/// The store owns the persisted form; a `Record` is only the transient
/// in-memory representation during a single operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value. Returns None unless the value is an
    /// object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in the record's own order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge the addressing key into the record, as done on every read.
    pub fn set_key(&mut self, key: &str) {
        self.0
            .insert(KEY_FIELD.to_string(), Value::String(key.to_string()));
    }

    /// The record's addressing key, if one has been merged in.
    pub fn key(&self) -> Option<&str> {
        self.0.get(KEY_FIELD).and_then(Value::as_str)
    }

    /// Drop the `key` field. The addressing key must never be written back
    /// as document content.
    pub fn strip_key(&mut self) {
        self.0.remove(KEY_FIELD);
    }

    /// Drop every derived (`_`-prefixed) field.
    pub fn strip_derived(&mut self) {
        self.0.retain(|field, _| !field.starts_with(DERIVED_PREFIX));
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.0
    }
}
