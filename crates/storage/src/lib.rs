//! Backing store capabilities for dirsearch
//!
//! The search index is built from three primitive capabilities and nothing
//! else:
//! - keyed scalar get/set/delete
//! - hash field get/set/delete/enumerate
//! - set add/remove/enumerate
//!
//! This crate defines that contract ([`Store`]) and its implementations:
//! - MemoryStore: DashMap-backed, in-process
//! - RedisStore: a Redis server (feature `redis`)
//! - testing::FaultyStore: fault injection wrapper for error-policy tests
//!
//! No call spans more than one key and there is no multi-call transaction:
//! callers that issue several calls for one logical update get no atomicity.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
pub mod testing;
pub mod traits;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;
pub use traits::Store;
