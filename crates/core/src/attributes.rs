//! Keyed attribute storage backing every parametrized entity.

use indexmap::IndexMap;

use crate::value::{Params, Value};

/// Values an [`AttributeContainer`] can hold.
///
/// Entities that nest other entities use their own attribute enum; plain
/// entities store [`Value`] directly.
pub trait AttributeValue: Clone + core::fmt::Debug + From<Value> {
    /// Present but carrying nothing (null / empty string).
    fn is_blank(&self) -> bool;

    /// Recursive export to a plain value.
    fn export(&self) -> Value;
}

impl AttributeValue for Value {
    fn is_blank(&self) -> bool {
        Value::is_blank(self)
    }

    fn export(&self) -> Value {
        self.clone()
    }
}

/// Key → value store with presence checks.
///
/// Lookup ignores insertion order; iteration and export follow it.
/// `has` reports presence, independently of whether the stored value is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeContainer<V = Value> {
    entries: IndexMap<String, V>,
}

impl<V> AttributeContainer<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or overwrite. Overwriting keeps the key's original position.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<V: AttributeValue> AttributeContainer<V> {
    /// Present and not blank.
    pub fn is_filled(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_blank())
    }

    /// Export every entry, in insertion order, as a `Value::Map`.
    pub fn export(&self) -> Value {
        let map: Params = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.export()))
            .collect();
        Value::Map(map)
    }
}

impl<V> Default for AttributeContainer<V> {
    fn default() -> Self {
        Self::new()
    }
}
