//! Listing index
//!
//! Listings are tokenized over title, description and a bounded prefix of
//! their body content, and carry three facets:
//!
//! | Facet      | Kind  | Set key suffix            |
//! |------------|-------|---------------------------|
//! | `category` | Scope | `facet:category:{id}`     |
//! | `featured` | Flag  | `facet:featured`          |
//! | `status`   | Value | `facet:status:{status}`   |

use crate::indexer::{IndexOutcome, Indexer};
use crate::request::{FacetFilter, SearchRequest, SearchResults};
use crate::schema::{FacetKind, FacetSpec, FacetValue, FieldRole, FieldSpec, IndexSchema, Indexable};
use crate::summary::Summary;
use chrono::{DateTime, Utc};
use dirsearch_core::{DocKind, Listing, ListingStatus, RecordId, Result, SearchConfig, SiteId};
use dirsearch_storage::Store;
use std::collections::BTreeMap;

/// Title field
pub const TITLE: &str = "title";
/// Short description field
pub const DESCRIPTION: &str = "description";
/// Body content field, bounded
pub const CONTENT: &str = "content";

/// Category membership facet
pub const CATEGORY: &str = "category";
/// Featured flag facet
pub const FEATURED: &str = "featured";
/// Publication status facet
pub const STATUS: &str = "status";

/// Schema for listings
pub fn listing_schema(config: &SearchConfig) -> IndexSchema {
    IndexSchema::new(DocKind::Listing)
        .field(FieldSpec::new(TITLE, FieldRole::Title))
        .field(FieldSpec::new(DESCRIPTION, FieldRole::Description))
        .field(FieldSpec::new(CONTENT, FieldRole::Content).with_max_chars(config.content_prefix_chars))
        .facet(FacetSpec::new(CATEGORY, FacetKind::Scope))
        .facet(FacetSpec::new(FEATURED, FacetKind::Flag))
        .facet(FacetSpec::new(STATUS, FacetKind::Value))
}

impl Indexable for Listing {
    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn site_id(&self) -> &SiteId {
        &self.site_id
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            TITLE => Some(&self.title),
            DESCRIPTION => Some(&self.description),
            CONTENT => Some(&self.content),
            _ => None,
        }
    }

    fn facet_value(&self, facet: &str) -> Option<FacetValue> {
        match facet {
            CATEGORY => Some(FacetValue::Value(self.category_id.to_string())),
            FEATURED => Some(FacetValue::Flag(self.featured)),
            STATUS => Some(FacetValue::Value(self.status.as_str().to_string())),
            _ => None,
        }
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn extras(&self) -> BTreeMap<String, String> {
        let mut extras = BTreeMap::new();
        if let Some(url) = &self.image_url {
            extras.insert("image_url".to_string(), url.clone());
        }
        if let Some(url) = &self.backlink_url {
            extras.insert("backlink_url".to_string(), url.clone());
        }
        extras
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Typed listing filters; unset fields do not constrain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Only listings in this category
    pub category_id: Option<RecordId>,
    /// Only featured listings
    pub featured_only: bool,
    /// Only listings with this status
    pub status: Option<ListingStatus>,
}

impl ListingFilters {
    /// No constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to a category
    pub fn in_category(mut self, category_id: RecordId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Builder: restrict to featured listings
    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Builder: restrict to a status
    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Facet filters these constraints translate to
    pub fn to_filters(&self) -> Vec<FacetFilter> {
        let mut filters = vec![];
        if let Some(category) = &self.category_id {
            filters.push(FacetFilter::equals(CATEGORY, category.as_str()));
        }
        if self.featured_only {
            filters.push(FacetFilter::flag(FEATURED));
        }
        if let Some(status) = self.status {
            filters.push(FacetFilter::equals(STATUS, status.as_str()));
        }
        filters
    }

    /// A request carrying these filters
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new().with_filters(self.to_filters())
    }
}

// ============================================================================
// ListingIndexer
// ============================================================================

/// Indexer for listings
#[derive(Debug)]
pub struct ListingIndexer<S> {
    inner: Indexer<S>,
}

impl<S: Store> ListingIndexer<S> {
    /// Create a listing indexer over `store`
    ///
    /// # Errors
    /// `Error::Config` when the configuration is invalid.
    pub fn new(store: S, config: SearchConfig) -> Result<Self> {
        let schema = listing_schema(&config);
        Ok(ListingIndexer {
            inner: Indexer::new(store, schema, config)?,
        })
    }

    /// Generic indexer underneath
    pub fn inner(&self) -> &Indexer<S> {
        &self.inner
    }

    /// Index a listing after its write succeeded
    pub fn index(&self, listing: &Listing) -> IndexOutcome {
        self.inner.index(listing)
    }

    /// Re-index a listing after its update succeeded
    pub fn update(&self, listing: &Listing) -> IndexOutcome {
        self.inner.update(listing)
    }

    /// Remove a listing after its deletion succeeded
    pub fn remove(&self, site: &SiteId, id: &RecordId) -> IndexOutcome {
        self.inner.remove(site, id)
    }

    /// Index a listing, returning failures
    pub fn try_index(&self, listing: &Listing) -> Result<()> {
        self.inner.try_index(listing)
    }

    /// Re-index a listing, returning failures
    pub fn try_update(&self, listing: &Listing) -> Result<()> {
        self.inner.try_update(listing)
    }

    /// Remove a listing, returning failures
    pub fn try_remove(&self, site: &SiteId, id: &RecordId) -> Result<bool> {
        self.inner.try_remove(site, id)
    }

    /// Search listings; empty on failure
    pub fn search(&self, site: &SiteId, request: &SearchRequest) -> SearchResults {
        self.inner.search(site, request)
    }

    /// Search listings, returning failures
    pub fn try_search(&self, site: &SiteId, request: &SearchRequest) -> Result<SearchResults> {
        self.inner.try_search(site, request)
    }

    /// Count matching listings; zero on failure
    pub fn count(&self, site: &SiteId, request: &SearchRequest) -> usize {
        self.inner.count(site, request)
    }

    /// Count matching listings, returning failures
    pub fn try_count(&self, site: &SiteId, request: &SearchRequest) -> Result<usize> {
        self.inner.try_count(site, request)
    }

    /// Current summary of a listing
    pub fn get_summary(&self, site: &SiteId, id: &RecordId) -> Result<Option<Summary>> {
        self.inner.get_summary(site, id)
    }
}
