//! Core types for dirsearch
//!
//! This crate defines the foundational types used throughout the system:
//! - SiteId / RecordId: validated identifiers that are safe to embed in store keys
//! - DocKind: discriminates listing and category index namespaces
//! - Listing / Category: the records the indexers consume
//! - KeySpace: per-site, per-kind key naming for every index structure
//! - SearchConfig: tunables loaded from `dirsearch.toml`
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod key;
pub mod record;
pub mod types;

pub use config::{FieldWeights, SearchConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use key::KeySpace;
pub use record::{Category, Listing};
pub use types::{validate_segment, DocKind, ListingStatus, RecordId, SiteId, KEY_SEPARATOR};
