//! Insertion-ordered key/value storage.
//!
//! A [`Section`] pairs a `HashMap` with a parallel key vector so iteration
//! always follows insertion order, never hash order. The two stay identical
//! in membership through every mutation.
//!
//! Inserts are first-wins: an existing key's value can only be replaced
//! through an explicit [`update`](Section::update). Autocreation is a named
//! operation, [`get_or_insert_default`](Section::get_or_insert_default),
//! rather than a side effect of lookup.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ConfigError, Result};
use crate::value::Value;

/// A named group of key/value pairs, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    entries: HashMap<String, Value>,
    order: Vec<String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new key. Returns false (and changes nothing) if the key
    /// already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, value.into());
        true
    }

    /// Replace the value of an existing key, leaving its position in the
    /// order untouched. Returns false if the key is absent.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Result<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_owned()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_owned()))
    }

    /// Look up a key, creating it with empty text if absent. The created
    /// key is appended to the order exactly once.
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut Value {
        if !self.entries.contains_key(key) {
            self.order.push(key.to_owned());
        }
        self.entries.entry(key.to_owned()).or_default()
    }

    /// Remove a key and return its value. Fails if the key is absent.
    pub fn pop(&mut self, key: &str) -> Result<Value> {
        match self.entries.remove(key) {
            Some(value) => {
                self.order.retain(|k| k != key);
                Ok(value)
            }
            None => Err(ConfigError::KeyNotFound(key.to_owned())),
        }
    }

    /// Remove a key if present.
    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order.iter().map(|key| (key.as_str(), &self.entries[key]))
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
