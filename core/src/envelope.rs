//! Dot-path access over raw API responses.
//!
//! # Design
//! `Envelope` owns a `serde_json::Value` and never hands out a raw container:
//! any lookup that lands on an object or array comes back as a fresh
//! `Envelope`, so `get` calls chain uniformly. Scalars come back as plain
//! values. `get_or` is the primitive every other accessor builds on.
//!
//! ```
//! use bemyguest_client::Envelope;
//! use serde_json::json;
//!
//! let response = Envelope::new(json!({
//!     "data": {"currency": {"code": "SGD"}},
//!     "meta": {"pagination": {"total": 6844, "per_page": 1}}
//! }));
//! assert_eq!(response.get_or("data.currency.code", "USD").as_str(), Some("SGD"));
//! let pagination = response.get("meta.pagination").unwrap();
//! assert_eq!(pagination.as_envelope().unwrap().get_or("total", 0).as_u64(), Some(6844));
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Immutable wrapper around a nested response structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    raw: Value,
}

/// Result of an envelope lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// An object or array, re-wrapped for further lookups.
    Nested(Envelope),
    /// A string, number, bool or null.
    Value(Value),
}

impl Envelope {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Resolve a dot-delimited path. Object segments are keys, array
    /// segments are decimal indices. An empty path resolves to the whole
    /// envelope.
    pub fn get(&self, path: &str) -> Option<Entry> {
        let mut current = &self.raw;
        if !path.is_empty() {
            for segment in path.split('.') {
                current = match current {
                    Value::Object(map) => map.get(segment)?,
                    Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                    _ => return None,
                };
            }
        }
        Some(Entry::from(current.clone()))
    }

    /// Like `get`, falling back to `default` when any step of the path is
    /// missing.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Entry {
        self.get(path)
            .unwrap_or_else(|| Entry::from(default.into()))
    }

    /// Top-level field access, `null` when absent.
    pub fn field(&self, key: &str) -> Entry {
        self.get_or(key, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        self.raw.is_array()
    }

    /// Number of elements of an array or members of an object.
    pub fn len(&self) -> usize {
        match &self.raw {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Array elements, each wrapped as an `Entry`. Empty for objects.
    pub fn items(&self) -> Vec<Entry> {
        match &self.raw {
            Value::Array(items) => items.iter().cloned().map(Entry::from).collect(),
            _ => Vec::new(),
        }
    }

    /// Object keys in map order. Empty for arrays.
    pub fn keys(&self) -> Vec<&str> {
        match &self.raw {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Plain, wrapper-free copy of the structure.
    pub fn to_plain(&self) -> Value {
        self.raw.clone()
    }

    pub fn into_plain(self) -> Value {
        self.raw
    }

    /// Convert into a typed model.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.raw.clone())
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Entry::Nested(Envelope::new(value)),
            scalar => Entry::Value(scalar),
        }
    }
}

impl Entry {
    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            Entry::Nested(envelope) => Some(envelope),
            Entry::Value(_) => None,
        }
    }

    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            Entry::Nested(envelope) => Some(envelope),
            Entry::Value(_) => None,
        }
    }

    /// Chain a lookup through a nested entry. Scalars have no children.
    pub fn get(&self, path: &str) -> Option<Entry> {
        self.as_envelope()?.get(path)
    }

    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Entry {
        self.get(path)
            .unwrap_or_else(|| Entry::from(default.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Entry::Value(v) => v.as_str(),
            Entry::Nested(_) => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Entry::Value(v) => v.as_u64(),
            Entry::Nested(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Entry::Value(v) => v.as_bool(),
            Entry::Nested(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Entry::Value(Value::Null))
    }

    pub fn len(&self) -> usize {
        self.as_envelope().map_or(0, Envelope::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_plain(&self) -> Value {
        match self {
            Entry::Nested(envelope) => envelope.to_plain(),
            Entry::Value(v) => v.clone(),
        }
    }

    pub fn into_plain(self) -> Value {
        match self {
            Entry::Nested(envelope) => envelope.into_plain(),
            Entry::Value(v) => v,
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.to_plain())
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}
