//! dirsearch - Listing and category search for multi-tenant directories
//!
//! dirsearch builds an inverted full-text index over listing and category
//! records on top of a key-value store that offers only scalar, hash and set
//! primitives. It provides tokenization, term postings, faceted filter sets,
//! incremental index maintenance, AND retrieval, weighted relevance scoring
//! and ranked pagination.
//!
//! # Quick Start
//!
//! ```
//! use dirsearch::{DirectorySearch, Listing, ListingFilters, RecordId, SiteId};
//!
//! let search = DirectorySearch::ephemeral().unwrap();
//! let site = SiteId::new("acme").unwrap();
//!
//! let boots = Listing::new(
//!     RecordId::new("l1").unwrap(),
//!     site.clone(),
//!     RecordId::new("c1").unwrap(),
//!     "Blue Hiking Boots",
//! )
//! .with_featured(true);
//! search.listings().index(&boots);
//!
//! let featured = ListingFilters::new().featured_only().request().with_query("boots");
//! assert_eq!(search.listings().search(&site, &featured).ids(), vec!["l1"]);
//! ```
//!
//! # Architecture
//!
//! - `dirsearch-core`: identifiers, records, key naming, errors, configuration
//! - `dirsearch-storage`: the [`Store`] capability trait and its backends
//! - `dirsearch-search`: tokenizer, index maintenance, planning, scoring
//!
//! Indexing is best-effort: the record layer calls it after its own write
//! commits and never fails that write because indexing failed.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub use dirsearch_core::{
    Category, DocKind, Error, FieldWeights, KeySpace, Listing, ListingStatus, RecordId, Result,
    SearchConfig, SiteId, CONFIG_FILE_NAME,
};
pub use dirsearch_search::{
    CategoryFilters, CategoryIndexer, FacetFilter, IndexOutcome, ListingFilters, ListingIndexer,
    Scorer, SearchHit, SearchRequest, SearchResults, SortMode, Summary,
};
pub use dirsearch_storage::{testing, MemoryStore, Store};
#[cfg(feature = "redis")]
pub use dirsearch_storage::RedisStore;

/// Listing and category search over one shared store
#[derive(Debug)]
pub struct DirectorySearch<S> {
    store: Arc<S>,
    config: SearchConfig,
    listings: ListingIndexer<Arc<S>>,
    categories: CategoryIndexer<Arc<S>>,
}

impl<S: Store> DirectorySearch<S> {
    /// Create both indexers over `store`
    ///
    /// # Errors
    /// `Error::Config` when the configuration is invalid.
    pub fn new(store: S, config: SearchConfig) -> Result<Self> {
        let store = Arc::new(store);
        let listings = ListingIndexer::new(Arc::clone(&store), config.clone())?;
        let categories = CategoryIndexer::new(Arc::clone(&store), config.clone())?;
        info!(
            target: "dirsearch::index",
            key_prefix = %config.key_prefix,
            default_limit = config.default_limit,
            "Directory search ready"
        );
        Ok(DirectorySearch {
            store,
            config,
            listings,
            categories,
        })
    }

    /// Create both indexers, reading configuration from `path`
    ///
    /// A missing file is created with the default configuration first.
    pub fn with_config_file(store: S, path: &Path) -> Result<Self> {
        SearchConfig::write_default_if_missing(path)?;
        let config = SearchConfig::from_file(path)?;
        Self::new(store, config)
    }

    /// Listing indexer
    pub fn listings(&self) -> &ListingIndexer<Arc<S>> {
        &self.listings
    }

    /// Category indexer
    pub fn categories(&self) -> &CategoryIndexer<Arc<S>> {
        &self.categories
    }

    /// Shared backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Configuration in use
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl DirectorySearch<MemoryStore> {
    /// In-memory search with the default configuration
    pub fn ephemeral() -> Result<Self> {
        Self::new(MemoryStore::new(), SearchConfig::default())
    }
}

#[cfg(feature = "redis")]
impl DirectorySearch<RedisStore> {
    /// Search over a Redis server at `redis_url`
    pub fn open_redis(redis_url: &str, config: SearchConfig) -> Result<Self> {
        Self::new(RedisStore::open(redis_url)?, config)
    }
}
