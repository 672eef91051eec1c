//! Property values and the generic discriminated [`Object`].
//!
//! Every entity in the graph is an `Object`: an `isa` discriminator plus an
//! ordered map of named properties. Cross-object references are always
//! [`Value::Id`], never nested objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::ObjectId;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A single property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Present but not yet assigned (e.g. `buildConfigurationList` on a fresh target).
    #[default]
    Unset,
    String(String),
    Id(ObjectId),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&ObjectId> {
        match self {
            Value::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    /// An empty list, the initial state of every id collection.
    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Id(id)
    }
}

impl From<Vec<ObjectId>> for Value {
    fn from(ids: Vec<ObjectId>) -> Self {
        Value::List(ids.into_iter().map(Value::Id).collect())
    }
}

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// A discriminated, field-addressed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    isa: String,
    #[serde(default)]
    properties: BTreeMap<String, Value>,
}

impl Object {
    pub fn new(isa: impl Into<String>) -> Self {
        Self { isa: isa.into(), properties: BTreeMap::new() }
    }

    /// Builder form of [`Object::set`]. Used by the factory templates, and
    /// as the structural override when one template specialises another.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn isa(&self) -> &str {
        &self.isa
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn id(&self, key: &str) -> Option<&ObjectId> {
        self.get(key).and_then(Value::as_id)
    }

    /// Identifiers held in the list property `key`, in list order.
    ///
    /// Non-id entries are skipped; a missing or non-list property yields an
    /// empty vector.
    pub fn ids(&self, key: &str) -> Vec<ObjectId> {
        self.get(key)
            .and_then(Value::as_list)
            .map(|items| items.iter().filter_map(Value::as_id).cloned().collect())
            .unwrap_or_default()
    }

    /// Append `id` to the list property `key`, creating the list when absent
    /// or unset. Never reorders or deduplicates.
    pub fn push_id(&mut self, key: &str, id: ObjectId) {
        match self.properties.get_mut(key) {
            Some(Value::List(items)) => items.push(Value::Id(id)),
            _ => {
                self.properties.insert(key.to_owned(), Value::List(vec![Value::Id(id)]));
            }
        }
    }

    /// Property names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
