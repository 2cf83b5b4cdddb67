//! Inverted index and ranked search for dirsearch
//!
//! This crate provides:
//! - Term extraction shared by indexing and querying
//! - IndexSchema and the Indexable trait for per-kind configuration
//! - Index maintenance (index, update, remove) over posting entries, term
//!   sets, facet sets and the summary hash
//! - Query planning, weighted scoring, ranking and pagination
//! - Indexer, the generic entry point, plus ListingIndexer and CategoryIndexer
//!
//! # Usage
//!
//! ```
//! use dirsearch_core::{Listing, RecordId, SearchConfig, SiteId};
//! use dirsearch_search::{ListingIndexer, SearchRequest};
//! use dirsearch_storage::MemoryStore;
//!
//! let site = SiteId::new("acme").unwrap();
//! let listings = ListingIndexer::new(MemoryStore::new(), SearchConfig::default()).unwrap();
//! let boots = Listing::new(
//!     RecordId::new("l1").unwrap(),
//!     site.clone(),
//!     RecordId::new("c1").unwrap(),
//!     "Red Hiking Boots",
//! );
//! listings.index(&boots);
//!
//! let results = listings.search(&site, &SearchRequest::new().with_query("boots"));
//! assert_eq!(results.ids(), vec!["l1"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod category;
pub mod indexer;
pub mod listing;
pub mod maintainer;
pub mod paginate;
pub mod planner;
pub mod request;
pub mod schema;
pub mod scorer;
pub mod summary;
pub mod tokenizer;

// Re-export commonly used types
pub use adapter::IndexAdapter;
pub use category::{category_schema, CategoryFilters, CategoryIndexer};
pub use indexer::{IndexOutcome, Indexer};
pub use listing::{listing_schema, ListingFilters, ListingIndexer};
pub use planner::Plan;
pub use request::{FacetFilter, SearchHit, SearchRequest, SearchResults, SortMode};
pub use schema::{FacetKind, FacetSpec, FacetValue, FieldRole, FieldSpec, IndexSchema, Indexable};
pub use scorer::{Scorer, WeightedTermScorer};
pub use summary::Summary;
pub use tokenizer::{extract_terms, tokenize};
