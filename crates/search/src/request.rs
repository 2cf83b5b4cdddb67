//! Search request and response types
//!
//! A request combines optional free text, facet filters (AND semantics),
//! a sort mode and a page window. A response carries hydrated summaries in
//! ranked order plus the total number of ranked candidates.

use crate::summary::Summary;
use dirsearch_core::{validate_segment, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FacetFilter
// ============================================================================

/// Constraint on a facet set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacetFilter {
    /// Record's value facet equals `value`
    Equals {
        /// Facet name
        facet: String,
        /// Required value
        value: String,
    },
    /// Record's flag facet is set
    Flag {
        /// Facet name
        facet: String,
    },
    /// Record has no value for a value facet
    Unset {
        /// Facet name
        facet: String,
    },
}

impl FacetFilter {
    /// Value filter
    pub fn equals(facet: impl Into<String>, value: impl Into<String>) -> Self {
        FacetFilter::Equals {
            facet: facet.into(),
            value: value.into(),
        }
    }

    /// Flag filter
    pub fn flag(facet: impl Into<String>) -> Self {
        FacetFilter::Flag {
            facet: facet.into(),
        }
    }

    /// Filter on records that leave a value facet unset
    pub fn unset(facet: impl Into<String>) -> Self {
        FacetFilter::Unset {
            facet: facet.into(),
        }
    }

    /// Facet name
    pub fn facet(&self) -> &str {
        match self {
            FacetFilter::Equals { facet, .. }
            | FacetFilter::Flag { facet }
            | FacetFilter::Unset { facet } => facet,
        }
    }

    /// Required value, `None` for flag and unset filters
    pub fn value(&self) -> Option<&str> {
        match self {
            FacetFilter::Equals { value, .. } => Some(value),
            FacetFilter::Flag { .. } | FacetFilter::Unset { .. } => None,
        }
    }

    /// Reject values that cannot name a facet set
    pub fn validate(&self) -> Result<()> {
        match self.value() {
            Some(value) => validate_segment("facet value", value),
            None => Ok(()),
        }
    }
}

// ============================================================================
// SortMode
// ============================================================================

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Score descending with query text, record id order without
    #[default]
    Relevance,
    /// Creation time descending
    Newest,
    /// Creation time ascending
    Oldest,
    /// Title ascending, case-insensitive
    TitleAsc,
    /// Title descending, case-insensitive
    TitleDesc,
    /// Flagged records first, then newest
    #[serde(rename = "featured")]
    FeaturedFirst,
}

impl SortMode {
    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::TitleAsc => "title_asc",
            SortMode::TitleDesc => "title_desc",
            SortMode::FeaturedFirst => "featured",
        }
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "title_asc" => Ok(SortMode::TitleAsc),
            "title_desc" => Ok(SortMode::TitleDesc),
            "featured" => Ok(SortMode::FeaturedFirst),
            other => Err(Error::InvalidKey(format!("unknown sort mode '{}'", other))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SearchRequest
// ============================================================================

/// A search over one site's records of one kind
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchRequest {
    /// Free text; absent or whitespace-only means no text constraint
    pub query: Option<String>,
    /// Facet constraints, all required
    pub filters: Vec<FacetFilter>,
    /// Ordering
    pub sort: SortMode,
    /// Ranked results to skip
    pub offset: usize,
    /// Page size; the configured default when `None`
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Unconstrained request
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set query text
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Builder: add a filter
    pub fn with_filter(mut self, filter: FacetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Builder: add several filters
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FacetFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Builder: set sort mode
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Builder: set offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Builder: set page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query text with surrounding whitespace removed, `None` when blank
    pub fn query_text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

// ============================================================================
// SearchResults
// ============================================================================

/// One ranked result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Hydrated projection
    pub summary: Summary,
    /// Relevance score; zero without query text
    pub score: f32,
}

/// A page of ranked results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    /// Results in rank order
    pub hits: Vec<SearchHit>,
    /// Ranked candidates before pagination
    pub total: usize,
    /// Offset the page starts at
    pub offset: usize,
    /// Page size requested
    pub limit: usize,
}

impl SearchResults {
    /// No results
    pub fn empty(offset: usize, limit: usize) -> Self {
        SearchResults {
            hits: vec![],
            total: 0,
            offset,
            limit,
        }
    }

    /// Number of hits on this page
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether this page has no hits
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether ranked results exist past this page
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.hits.len()) < self.total
    }

    /// Record ids in rank order
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.summary.id.as_str()).collect()
    }
}
