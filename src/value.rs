//! Traversable wrapper over decoded JSON.
//!
//! API results come back as arbitrarily nested JSON whose shape is only
//! known at runtime. [`Value`] keeps that data traversable without
//! intermediate types: key reads on mappings, index reads on sequences,
//! in-place writes, and serialization back to the exact JSON that arrived.
//! Mappings remember their key order, so a decode / re-encode round trip
//! reproduces the wire text byte for byte.
//!
//! Reading a key that is absent (or reading a key off a scalar) is an
//! [`Error::NoSuchField`], not a panic and not a silent null.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use tracing::debug;

/// One node of a decoded JSON tree.
///
/// Mappings preserve insertion order. Equality is structural and, matching
/// JSON object semantics, ignores key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Recursively converts raw decoded JSON into a `Value` tree.
    pub fn decode(raw: serde_json::Value) -> Value {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(number),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::decode).collect())
            }
            serde_json::Value::Object(fields) => Value::Mapping(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::decode(value)))
                    .collect(),
            ),
        }
    }

    /// Reads the member stored under `key`.
    ///
    /// Fails with [`Error::NoSuchField`] when the key is absent or when this
    /// value is not a mapping.
    pub fn get(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Mapping(fields) => fields.get(key).ok_or_else(|| Error::no_such_field(key)),
            _ => Err(Error::no_such_field(key)),
        }
    }

    /// Mutable variant of [`Value::get`], for writes below the top level.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Mapping(fields) => fields.get_mut(key).ok_or_else(|| Error::no_such_field(key)),
            _ => Err(Error::no_such_field(key)),
        }
    }

    /// Stores `value` under `key`, replacing any previous member.
    ///
    /// New keys append at the end of the mapping's order; existing keys keep
    /// their position. Writes to a non-mapping value are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        match self {
            Value::Mapping(fields) => {
                fields.insert(key, value.into());
            }
            _ => debug!(target: "userapp", key = key.as_str(), "write to a non-mapping value ignored"),
        }
    }

    /// Whether this value is a mapping that carries `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self, Value::Mapping(fields) if fields.contains_key(key))
    }

    /// Iterates the `(key, member)` pairs of a mapping in its own order.
    ///
    /// Non-mapping values yield an empty iterator. The iterator borrows; each
    /// call starts a fresh pass.
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Value::Mapping(fields) => Entries {
                inner: Some(fields.iter()),
            },
            _ => Entries { inner: None },
        }
    }

    /// Reads the element at `index` of a sequence.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_sequence()?.get(index)
    }

    /// Serializes back to compact JSON, mappings in their stored key order.
    pub fn to_json(&self) -> String {
        self.to_string()
    }

    /// Converts back into plain `serde_json::Value`, preserving key order.
    pub fn to_plain(&self) -> serde_json::Value {
        self.clone().into()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        Value::decode(raw)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(flag),
            Value::Number(number) => serde_json::Value::Number(number),
            Value::String(text) => serde_json::Value::String(text),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(fields) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Number(number.into())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Value::Number(number.into())
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

/// Borrowing iterator over the members of a mapping, in stored order.
pub struct Entries<'a> {
    inner: Option<indexmap::map::Iter<'a, String, Value>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .next()
            .map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(iter) => iter.size_hint(),
            None => (0, Some(0)),
        }
    }
}
