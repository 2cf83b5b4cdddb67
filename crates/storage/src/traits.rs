//! Store capability trait
//!
//! Mirrors the Redis data model: a key holds either a scalar string, a hash
//! of string fields, or a set of string members. Reading a missing key yields
//! `None` or an empty collection. Removing the last field or member drops the
//! key. Touching a key of another type fails with `Error::WrongType`.

use dirsearch_core::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Primitive key-value capabilities the index is built from
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Each call is atomic on its own;
/// nothing groups calls together.
pub trait Store: Send + Sync {
    // ========== Scalar ==========

    /// Get a scalar value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a scalar value, replacing whatever the key held
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key of any type. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;

    // ========== Hash ==========

    /// Get one hash field
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// Set one hash field
    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()>;

    /// Delete one hash field. Returns whether it existed.
    fn hdel(&self, key: &str, field: &str) -> Result<bool>;

    /// Enumerate hash field names
    fn hkeys(&self, key: &str) -> Result<Vec<String>>;

    /// Enumerate hash values
    fn hvals(&self, key: &str) -> Result<Vec<String>>;

    /// Enumerate hash field/value pairs
    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>>;

    // ========== Set ==========

    /// Add a set member. Returns whether it was newly added.
    fn sadd(&self, key: &str, member: &str) -> Result<bool>;

    /// Remove a set member. Returns whether it was present.
    fn srem(&self, key: &str, member: &str) -> Result<bool>;

    /// Enumerate set members
    fn smembers(&self, key: &str) -> Result<HashSet<String>>;

    /// Set cardinality
    fn scard(&self, key: &str) -> Result<usize>;
}

macro_rules! forward_store {
    ($($ty:ty),*) => {$(
        impl<S: Store + ?Sized> Store for $ty {
            fn get(&self, key: &str) -> Result<Option<String>> {
                (**self).get(key)
            }
            fn set(&self, key: &str, value: &str) -> Result<()> {
                (**self).set(key, value)
            }
            fn delete(&self, key: &str) -> Result<bool> {
                (**self).delete(key)
            }
            fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
                (**self).hget(key, field)
            }
            fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
                (**self).hset(key, field, value)
            }
            fn hdel(&self, key: &str, field: &str) -> Result<bool> {
                (**self).hdel(key, field)
            }
            fn hkeys(&self, key: &str) -> Result<Vec<String>> {
                (**self).hkeys(key)
            }
            fn hvals(&self, key: &str) -> Result<Vec<String>> {
                (**self).hvals(key)
            }
            fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
                (**self).hgetall(key)
            }
            fn sadd(&self, key: &str, member: &str) -> Result<bool> {
                (**self).sadd(key, member)
            }
            fn srem(&self, key: &str, member: &str) -> Result<bool> {
                (**self).srem(key, member)
            }
            fn smembers(&self, key: &str) -> Result<HashSet<String>> {
                (**self).smembers(key)
            }
            fn scard(&self, key: &str) -> Result<usize> {
                (**self).scard(key)
            }
        }
    )*};
}

forward_store!(Arc<S>, &S, Box<S>);
