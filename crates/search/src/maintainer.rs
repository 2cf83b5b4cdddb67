//! Index maintenance for one record
//!
//! Every operation is an ordered sequence of independent store calls. No
//! call sequence is atomic, and a failure part way leaves whatever was
//! already written. The ordering keeps such partial states recoverable:
//! - indexing first erases whatever a previous version left, then writes
//!   the summary before anything else, so a later deindex can find the
//!   facet values and terms of a half-indexed record
//! - deindexing deletes the summary last, so a half-removed record can be
//!   removed again
//!
//! Deindexing treats every missing piece as already clean.

use crate::adapter::IndexAdapter;
use crate::schema::{IndexSchema, Indexable};
use crate::summary::Summary;
use dirsearch_core::{Error, RecordId, Result};
use dirsearch_storage::Store;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Write a record's summary, postings, term set and facet memberships
///
/// Postings and facet memberships of an already indexed version are
/// cleared first, so indexing the same id twice never leaves the older
/// terms or facet values behind. Returns the summary that was written.
pub fn index_record<S, R>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, record: &R) -> Result<Summary>
where
    S: Store + ?Sized,
    R: Indexable,
{
    if erase(adapter, schema, record.record_id())? {
        debug!(
            target: "dirsearch::index",
            kind = %schema.kind,
            record_id = %record.record_id(),
            "Cleared previous version before indexing"
        );
    }
    write(adapter, schema, record)
}

fn write<S, R>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, record: &R) -> Result<Summary>
where
    S: Store + ?Sized,
    R: Indexable,
{
    let summary = Summary::from_record(schema, record);
    let terms = summary.terms();
    let id = &summary.id;

    adapter.put_summary(&summary)?;

    for term in &terms {
        adapter.add_posting(term, id)?;
    }
    adapter.write_term_set(id, &terms)?;

    for (facet, value) in schema.memberships(&summary.facets) {
        adapter.add_facet(facet, value, id)?;
    }

    debug!(
        target: "dirsearch::index",
        kind = %schema.kind,
        record_id = %id,
        terms = terms.len(),
        "Indexed record"
    );
    Ok(summary)
}

/// Erase the previous version of a record, then index the new one
pub fn update_record<S, R>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, record: &R) -> Result<Summary>
where
    S: Store + ?Sized,
    R: Indexable,
{
    deindex(adapter, schema, record.record_id())?;
    write(adapter, schema, record)
}

/// Remove a record from the index; alias of [`deindex`]
pub fn remove_record<S>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, id: &RecordId) -> Result<bool>
where
    S: Store + ?Sized,
{
    deindex(adapter, schema, id)
}

/// Erase every structure derived from a record
///
/// Postings are cleared for the union of the stored term set and the terms
/// re-derived from the summary, so a record whose term set write never
/// landed is still cleaned. Returns `false` when nothing of the record was
/// found, which is a no-op rather than an error.
pub fn deindex<S>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, id: &RecordId) -> Result<bool>
where
    S: Store + ?Sized,
{
    let erased = erase(adapter, schema, id)?;
    if !erased {
        let missing = Error::MissingDocument {
            site_id: adapter.keys().site().to_string(),
            record_id: id.to_string(),
        };
        debug!(target: "dirsearch::index", error = %missing, "Nothing to deindex");
    }
    Ok(erased)
}

fn erase<S>(adapter: &IndexAdapter<'_, S>, schema: &IndexSchema, id: &RecordId) -> Result<bool>
where
    S: Store + ?Sized,
{
    let (summary, summary_present) = match adapter.summary(id.as_str()) {
        Ok(Some(summary)) => (Some(summary), true),
        Ok(None) => (None, false),
        Err(e @ Error::MalformedSummary { .. }) => {
            warn!(target: "dirsearch::index", error = %e, "Cleaning up record with unreadable summary");
            (None, true)
        }
        Err(e) => return Err(e),
    };

    let stored_terms = match adapter.read_term_set(id) {
        Ok(terms) => terms,
        Err(Error::Serialization(reason)) => {
            warn!(
                target: "dirsearch::index",
                record_id = %id,
                %reason,
                "Ignoring unreadable term set"
            );
            Some(BTreeSet::new())
        }
        Err(e) => return Err(e),
    };

    if !summary_present && stored_terms.is_none() {
        return Ok(false);
    }

    let mut terms = stored_terms.unwrap_or_default();
    if let Some(summary) = &summary {
        terms.extend(summary.terms());
    }
    for term in &terms {
        adapter.remove_posting(term, id)?;
    }

    match &summary {
        Some(summary) => {
            for (facet, value) in schema.memberships(&summary.facets) {
                adapter.remove_facet(facet, value, id)?;
            }
        }
        None => {
            // Only the valueless sets can be located without the summary
            for spec in &schema.facets {
                adapter.remove_facet(spec.name, None, id)?;
            }
        }
    }

    adapter.delete_term_set(id)?;
    adapter.delete_summary(id)?;

    debug!(
        target: "dirsearch::index",
        kind = %schema.kind,
        record_id = %id,
        terms = terms.len(),
        "Deindexed record"
    );
    Ok(true)
}
