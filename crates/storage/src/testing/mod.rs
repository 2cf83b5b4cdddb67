//! Testing utilities for index resilience
//!
//! This module provides tools for exercising the error policy of the layers
//! above the store:
//!
//! - **FaultyStore**: wraps any store and fails selected operations, either
//!   immediately or after a number of successful calls
//!
//! # Example
//!
//! ```
//! use dirsearch_storage::testing::{FaultOp, FaultyStore};
//! use dirsearch_storage::{MemoryStore, Store};
//!
//! let store = FaultyStore::new(MemoryStore::new());
//! store.fail_after(FaultOp::SAdd, 1);
//! assert!(store.sadd("k", "a").is_ok());
//! assert!(store.sadd("k", "b").is_err());
//! ```

mod faulty;

pub use faulty::{FaultOp, FaultyStore};
