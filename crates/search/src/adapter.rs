//! Posting, term set, facet and summary access
//!
//! Thin wrappers that turn index-level operations into single store calls
//! under one site's [`KeySpace`]. Nothing here spans more than one store
//! call, so nothing here is atomic beyond what the store itself gives.

use crate::summary::Summary;
use dirsearch_core::{KeySpace, RecordId, Result};
use dirsearch_storage::Store;
use std::collections::{BTreeSet, HashSet};

/// Index structures of one site and one record kind
pub struct IndexAdapter<'a, S: ?Sized> {
    store: &'a S,
    keys: KeySpace,
}

impl<'a, S: Store + ?Sized> IndexAdapter<'a, S> {
    /// Bind a store to a key space
    pub fn new(store: &'a S, keys: KeySpace) -> Self {
        IndexAdapter { store, keys }
    }

    /// Key space in use
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }

    // ========================================================================
    // Posting entries
    // ========================================================================

    /// Add a record to a term's posting entry
    pub fn add_posting(&self, term: &str, id: &RecordId) -> Result<bool> {
        self.store.sadd(&self.keys.posting(term), id.as_str())
    }

    /// Remove a record from a term's posting entry
    pub fn remove_posting(&self, term: &str, id: &RecordId) -> Result<bool> {
        self.store.srem(&self.keys.posting(term), id.as_str())
    }

    /// Records holding a term
    pub fn postings(&self, term: &str) -> Result<HashSet<String>> {
        self.store.smembers(&self.keys.posting(term))
    }

    /// Number of records holding a term
    pub fn posting_len(&self, term: &str) -> Result<usize> {
        self.store.scard(&self.keys.posting(term))
    }

    // ========================================================================
    // Term sets
    // ========================================================================

    /// Replace a record's term set
    pub fn write_term_set(&self, id: &RecordId, terms: &BTreeSet<String>) -> Result<()> {
        let encoded = serde_json::to_string(terms)?;
        self.store.set(&self.keys.term_set(id), &encoded)
    }

    /// A record's term set, if one is stored
    ///
    /// # Errors
    /// `Error::Serialization` when the stored value is not a JSON string array.
    pub fn read_term_set(&self, id: &RecordId) -> Result<Option<BTreeSet<String>>> {
        match self.store.get(&self.keys.term_set(id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Delete a record's term set
    pub fn delete_term_set(&self, id: &RecordId) -> Result<bool> {
        self.store.delete(&self.keys.term_set(id))
    }

    // ========================================================================
    // Facet sets
    // ========================================================================

    /// Add a record to a facet set
    pub fn add_facet(&self, facet: &str, value: Option<&str>, id: &RecordId) -> Result<bool> {
        self.store.sadd(&self.keys.facet(facet, value), id.as_str())
    }

    /// Remove a record from a facet set
    pub fn remove_facet(&self, facet: &str, value: Option<&str>, id: &RecordId) -> Result<bool> {
        self.store.srem(&self.keys.facet(facet, value), id.as_str())
    }

    /// Members of a facet set
    pub fn facet_members(&self, facet: &str, value: Option<&str>) -> Result<HashSet<String>> {
        self.store.smembers(&self.keys.facet(facet, value))
    }

    // ========================================================================
    // Summary hash
    // ========================================================================

    /// Write a record's summary
    pub fn put_summary(&self, summary: &Summary) -> Result<()> {
        let encoded = summary.encode()?;
        self.store
            .hset(&self.keys.summary(), summary.id.as_str(), &encoded)
    }

    /// Raw summary value, undecoded
    pub fn summary_raw(&self, id: &str) -> Result<Option<String>> {
        self.store.hget(&self.keys.summary(), id)
    }

    /// A record's summary, if present
    ///
    /// # Errors
    /// `Error::MalformedSummary` when the stored value cannot be decoded.
    pub fn summary(&self, id: &str) -> Result<Option<Summary>> {
        match self.summary_raw(id)? {
            Some(raw) => Summary::decode(id, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Delete a record's summary
    pub fn delete_summary(&self, id: &RecordId) -> Result<bool> {
        self.store.hdel(&self.keys.summary(), id.as_str())
    }

    /// Every record id with a summary
    pub fn summary_ids(&self) -> Result<HashSet<String>> {
        Ok(self.store.hkeys(&self.keys.summary())?.into_iter().collect())
    }
}
