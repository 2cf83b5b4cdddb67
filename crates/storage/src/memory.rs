//! In-process store
//!
//! DashMap keyed by the full string key, one typed value per key.
//! Lock-free reads, sharded writes, O(1) lookups.
//!
//! # Design
//!
//! - DashMap: sharded by key hash, so unrelated keys never contend
//! - FxHashMap / FxHashSet: fast non-crypto hashing for fields and members
//! - Each trait call touches exactly one key under that key's shard lock,
//!   which makes every call atomic on its own and nothing more

use crate::traits::Store;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dirsearch_core::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::HashSet;

/// Value held by one key
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Scalar string
    Scalar(String),
    /// Hash of string fields
    Hash(FxHashMap<String, String>),
    /// Set of string members
    Set(FxHashSet<String>),
}

impl StoredValue {
    fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Scalar(_) => "string",
            StoredValue::Hash(_) => "hash",
            StoredValue::Set(_) => "set",
        }
    }
}

fn wrong_type(key: &str) -> Error {
    Error::WrongType {
        key: key.to_string(),
    }
}

/// DashMap-backed [`Store`]
///
/// # Example
///
/// ```
/// use dirsearch_storage::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.sadd("fruit", "apple").unwrap();
/// assert!(store.smembers("fruit").unwrap().contains("apple"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<String, StoredValue>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no key is live
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sorted live keys starting with `prefix`
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .data
            .iter()
            .filter(|r| r.key().starts_with(prefix))
            .map(|r| r.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Type of the value held at `key`, if any
    pub fn type_of(&self, key: &str) -> Option<&'static str> {
        self.data.get(key).map(|r| r.value().type_name())
    }

    /// Drop every key
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl Store for MemoryStore {
    // ========================================================================
    // Scalar
    // ========================================================================

    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(r) => match r.value() {
                StoredValue::Scalar(s) => Ok(Some(s.clone())),
                _ => Err(wrong_type(key)),
            },
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .insert(key.to_string(), StoredValue::Scalar(value.to_string()));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.data.remove(key).is_some())
    }

    // ========================================================================
    // Hash
    // ========================================================================

    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(r) => match r.value() {
                StoredValue::Hash(h) => Ok(h.get(field).cloned()),
                _ => Err(wrong_type(key)),
            },
        }
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        match self.data.entry(key.to_string()) {
            Entry::Occupied(mut o) => match o.get_mut() {
                StoredValue::Hash(h) => {
                    h.insert(field.to_string(), value.to_string());
                    Ok(())
                }
                _ => Err(wrong_type(key)),
            },
            Entry::Vacant(v) => {
                let mut h = FxHashMap::default();
                h.insert(field.to_string(), value.to_string());
                v.insert(StoredValue::Hash(h));
                Ok(())
            }
        }
    }

    fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        let mut removed = false;
        let mut mismatched = false;
        // Drop the key once its last field is gone
        self.data.remove_if_mut(key, |_, value| match value {
            StoredValue::Hash(h) => {
                removed = h.remove(field).is_some();
                h.is_empty()
            }
            _ => {
                mismatched = true;
                false
            }
        });
        if mismatched {
            return Err(wrong_type(key));
        }
        Ok(removed)
    }

    fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        match self.data.get(key) {
            None => Ok(vec![]),
            Some(r) => match r.value() {
                StoredValue::Hash(h) => Ok(h.keys().cloned().collect()),
                _ => Err(wrong_type(key)),
            },
        }
    }

    fn hvals(&self, key: &str) -> Result<Vec<String>> {
        match self.data.get(key) {
            None => Ok(vec![]),
            Some(r) => match r.value() {
                StoredValue::Hash(h) => Ok(h.values().cloned().collect()),
                _ => Err(wrong_type(key)),
            },
        }
    }

    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
        match self.data.get(key) {
            None => Ok(vec![]),
            Some(r) => match r.value() {
                StoredValue::Hash(h) => Ok(h
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()),
                _ => Err(wrong_type(key)),
            },
        }
    }

    // ========================================================================
    // Set
    // ========================================================================

    fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        match self.data.entry(key.to_string()) {
            Entry::Occupied(mut o) => match o.get_mut() {
                StoredValue::Set(s) => Ok(s.insert(member.to_string())),
                _ => Err(wrong_type(key)),
            },
            Entry::Vacant(v) => {
                let mut s = FxHashSet::default();
                s.insert(member.to_string());
                v.insert(StoredValue::Set(s));
                Ok(true)
            }
        }
    }

    fn srem(&self, key: &str, member: &str) -> Result<bool> {
        let mut removed = false;
        let mut mismatched = false;
        self.data.remove_if_mut(key, |_, value| match value {
            StoredValue::Set(s) => {
                removed = s.remove(member);
                s.is_empty()
            }
            _ => {
                mismatched = true;
                false
            }
        });
        if mismatched {
            return Err(wrong_type(key));
        }
        Ok(removed)
    }

    fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        match self.data.get(key) {
            None => Ok(HashSet::new()),
            Some(r) => match r.value() {
                StoredValue::Set(s) => Ok(s.iter().cloned().collect()),
                _ => Err(wrong_type(key)),
            },
        }
    }

    fn scard(&self, key: &str) -> Result<usize> {
        match self.data.get(key) {
            None => Ok(0),
            Some(r) => match r.value() {
                StoredValue::Set(s) => Ok(s.len()),
                _ => Err(wrong_type(key)),
            },
        }
    }
}
