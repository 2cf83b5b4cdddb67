//! Generic indexer
//!
//! One `Indexer` serves one record kind. It binds a store, an
//! [`IndexSchema`] and a [`SearchConfig`], and exposes two layers:
//!
//! - `try_*` operations return every failure to the caller
//! - policy wrappers apply the error policy of the record layer: indexing
//!   failures are logged and reported as an [`IndexOutcome`], query failures
//!   degrade to empty results or a zero count
//!
//! Indexing is invoked only after the caller's own write succeeded, and an
//! indexing failure must never fail that write.

use crate::adapter::IndexAdapter;
use crate::maintainer;
use crate::paginate::paginate;
use crate::planner::{self, Plan};
use crate::request::{SearchHit, SearchRequest, SearchResults};
use crate::schema::{IndexSchema, Indexable};
use crate::scorer::{rank, Scorer, WeightedTermScorer};
use crate::summary::Summary;
use dirsearch_core::{Error, KeySpace, RecordId, Result, SearchConfig, SiteId};
use dirsearch_storage::Store;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// IndexOutcome
// ============================================================================

/// Result of a policy-wrapped indexing call
#[derive(Debug)]
pub enum IndexOutcome {
    /// The record is indexed in its current version
    Indexed,
    /// The record was found and removed
    Removed,
    /// Removal found nothing to remove
    NotIndexed,
    /// The call failed part way; the index may be stale for this record
    Failed(Error),
}

impl IndexOutcome {
    /// Whether the call failed
    pub fn is_failed(&self) -> bool {
        matches!(self, IndexOutcome::Failed(_))
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            IndexOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Indexer
// ============================================================================

/// Index maintenance and search for one record kind
pub struct Indexer<S> {
    store: S,
    schema: IndexSchema,
    config: SearchConfig,
    scorer: Arc<dyn Scorer>,
}

impl<S> fmt::Debug for Indexer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexer")
            .field("kind", &self.schema.kind)
            .field("key_prefix", &self.config.key_prefix)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl<S: Store> Indexer<S> {
    /// Create an indexer scoring with the configured field weights
    ///
    /// # Errors
    /// `Error::Config` when the configuration is invalid.
    pub fn new(store: S, schema: IndexSchema, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let scorer = Arc::new(WeightedTermScorer::new(config.weights));
        Ok(Indexer {
            store,
            schema,
            config,
            scorer,
        })
    }

    /// Builder: set custom scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Schema in use
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Configuration in use
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn adapter(&self, site: &SiteId) -> IndexAdapter<'_, S> {
        IndexAdapter::new(
            &self.store,
            KeySpace::new(&self.config.key_prefix, site, self.schema.kind),
        )
    }

    // ========================================================================
    // Fallible operations
    // ========================================================================

    /// Index a record
    pub fn try_index<R: Indexable>(&self, record: &R) -> Result<()> {
        let adapter = self.adapter(record.site_id());
        maintainer::index_record(&adapter, &self.schema, record).map(|_| ())
    }

    /// Replace the indexed version of a record
    pub fn try_update<R: Indexable>(&self, record: &R) -> Result<()> {
        let adapter = self.adapter(record.site_id());
        maintainer::update_record(&adapter, &self.schema, record).map(|_| ())
    }

    /// Remove a record; `Ok(false)` when it was not indexed
    pub fn try_remove(&self, site: &SiteId, id: &RecordId) -> Result<bool> {
        maintainer::remove_record(&self.adapter(site), &self.schema, id)
    }

    /// Ranked, paginated search
    ///
    /// Candidates whose summary is missing are skipped; candidates whose
    /// summary cannot be decoded are skipped with a warning.
    pub fn try_search(&self, site: &SiteId, request: &SearchRequest) -> Result<SearchResults> {
        let adapter = self.adapter(site);
        let limit = request.limit.unwrap_or(self.config.default_limit);
        let Plan { terms, candidates } =
            planner::plan(&adapter, &self.schema, request.query_text(), &request.filters)?;
        let scored = !terms.is_empty();

        let mut ids: Vec<String> = candidates.into_iter().collect();
        ids.sort_unstable();

        let mut hits = Vec::with_capacity(ids.len());
        for id in &ids {
            match adapter.summary(id) {
                Ok(Some(summary)) => {
                    let score = if scored {
                        self.scorer.score(&summary, &terms, &self.schema)
                    } else {
                        0.0
                    };
                    hits.push(SearchHit { summary, score });
                }
                Ok(None) => {
                    debug!(target: "dirsearch::query", record_id = %id, "Skipping candidate without summary");
                }
                Err(e @ Error::MalformedSummary { .. }) => {
                    warn!(target: "dirsearch::query", error = %e, "Skipping malformed summary");
                }
                Err(e) => return Err(e),
            }
        }

        rank(&mut hits, request.sort, scored, &self.schema);
        let total = hits.len();
        let hits = paginate(hits, request.offset, limit);

        debug!(
            target: "dirsearch::query",
            site_id = %site,
            kind = %self.schema.kind,
            sort = %request.sort,
            total,
            returned = hits.len(),
            "Search completed"
        );
        Ok(SearchResults {
            hits,
            total,
            offset: request.offset,
            limit,
        })
    }

    /// Number of candidates a search would rank, without hydration
    ///
    /// Sort and page window of `request` are ignored.
    pub fn try_count(&self, site: &SiteId, request: &SearchRequest) -> Result<usize> {
        let adapter = self.adapter(site);
        let plan = planner::plan(&adapter, &self.schema, request.query_text(), &request.filters)?;
        Ok(plan.candidates.len())
    }

    /// Current summary of a record
    pub fn get_summary(&self, site: &SiteId, id: &RecordId) -> Result<Option<Summary>> {
        self.adapter(site).summary(id.as_str())
    }

    // ========================================================================
    // Policy wrappers
    // ========================================================================

    fn outcome(&self, op: &str, id: &RecordId, result: Result<IndexOutcome>) -> IndexOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    target: "dirsearch::index",
                    op,
                    kind = %self.schema.kind,
                    record_id = %id,
                    error = %e,
                    "Indexing failed; index may be stale for this record"
                );
                IndexOutcome::Failed(e)
            }
        }
    }

    /// Index a record, logging instead of returning failures
    pub fn index<R: Indexable>(&self, record: &R) -> IndexOutcome {
        let result = self.try_index(record).map(|_| IndexOutcome::Indexed);
        self.outcome("index", record.record_id(), result)
    }

    /// Update a record, logging instead of returning failures
    pub fn update<R: Indexable>(&self, record: &R) -> IndexOutcome {
        let result = self.try_update(record).map(|_| IndexOutcome::Indexed);
        self.outcome("update", record.record_id(), result)
    }

    /// Remove a record, logging instead of returning failures
    pub fn remove(&self, site: &SiteId, id: &RecordId) -> IndexOutcome {
        let result = self.try_remove(site, id).map(|removed| {
            if removed {
                IndexOutcome::Removed
            } else {
                IndexOutcome::NotIndexed
            }
        });
        self.outcome("remove", id, result)
    }

    /// Search, degrading to an empty page on failure
    pub fn search(&self, site: &SiteId, request: &SearchRequest) -> SearchResults {
        self.try_search(site, request).unwrap_or_else(|e| {
            warn!(target: "dirsearch::query", site_id = %site, error = %e, "Search failed; returning no results");
            SearchResults::empty(
                request.offset,
                request.limit.unwrap_or(self.config.default_limit),
            )
        })
    }

    /// Count, degrading to zero on failure
    pub fn count(&self, site: &SiteId, request: &SearchRequest) -> usize {
        self.try_count(site, request).unwrap_or_else(|e| {
            warn!(target: "dirsearch::query", site_id = %site, error = %e, "Count failed; returning zero");
            0
        })
    }
}
