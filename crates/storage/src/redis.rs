//! Redis-backed store
//!
//! Maps each [`Store`] capability onto a single Redis command over one
//! synchronous connection. The connection is guarded by a mutex, so calls
//! from different threads are serialized at the client; the server still
//! interleaves them with other clients freely.

use crate::traits::Store;
use ::redis::{Client, Commands, Connection, RedisError};
use dirsearch_core::{Error, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tracing::info;

fn map_err(key: &str, e: RedisError) -> Error {
    if e.code() == Some("WRONGTYPE") {
        Error::WrongType {
            key: key.to_string(),
        }
    } else {
        Error::StoreUnavailable(format!("redis error on '{}': {}", key, e))
    }
}

/// Redis implementation of [`Store`]
pub struct RedisStore {
    connection: Mutex<Connection>,
}

impl RedisStore {
    /// Connect to `redis_url` and verify the connection with `PING`
    pub fn open(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| Error::StoreUnavailable(format!("Failed to create Redis client: {}", e)))?;
        let mut connection = client
            .get_connection()
            .map_err(|e| Error::StoreUnavailable(format!("Failed to connect to Redis: {}", e)))?;

        ::redis::cmd("PING")
            .query::<String>(&mut connection)
            .map_err(|e| Error::StoreUnavailable(format!("Redis connection test failed: {}", e)))?;

        info!(target: "dirsearch::store", "Initialized Redis store");

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

impl Store for RedisStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection.lock().get(key).map_err(|e| map_err(key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .lock()
            .set::<_, _, ()>(key, value)
            .map_err(|e| map_err(key, e))
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let removed: usize = self.connection.lock().del(key).map_err(|e| map_err(key, e))?;
        Ok(removed > 0)
    }

    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.connection
            .lock()
            .hget(key, field)
            .map_err(|e| map_err(key, e))
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.connection
            .lock()
            .hset::<_, _, _, ()>(key, field, value)
            .map_err(|e| map_err(key, e))
    }

    fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        let removed: usize = self
            .connection
            .lock()
            .hdel(key, field)
            .map_err(|e| map_err(key, e))?;
        Ok(removed > 0)
    }

    fn hkeys(&self, key: &str) -> Result<Vec<String>> {
        self.connection.lock().hkeys(key).map_err(|e| map_err(key, e))
    }

    fn hvals(&self, key: &str) -> Result<Vec<String>> {
        self.connection.lock().hvals(key).map_err(|e| map_err(key, e))
    }

    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
        let all: HashMap<String, String> = self
            .connection
            .lock()
            .hgetall(key)
            .map_err(|e| map_err(key, e))?;
        Ok(all.into_iter().collect())
    }

    fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let added: usize = self
            .connection
            .lock()
            .sadd(key, member)
            .map_err(|e| map_err(key, e))?;
        Ok(added > 0)
    }

    fn srem(&self, key: &str, member: &str) -> Result<bool> {
        let removed: usize = self
            .connection
            .lock()
            .srem(key, member)
            .map_err(|e| map_err(key, e))?;
        Ok(removed > 0)
    }

    fn smembers(&self, key: &str) -> Result<HashSet<String>> {
        self.connection
            .lock()
            .smembers(key)
            .map_err(|e| map_err(key, e))
    }

    fn scard(&self, key: &str) -> Result<usize> {
        self.connection.lock().scard(key).map_err(|e| map_err(key, e))
    }
}
