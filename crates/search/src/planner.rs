//! Query planning
//!
//! Turns free text plus facet filters into the set of qualifying record ids.
//!
//! # Algorithm
//!
//! 1. With query text, extract terms and fetch every term's posting entry.
//!    No surviving term, or any term without postings, yields nothing.
//! 2. Intersect posting sets smallest first, stopping once the running
//!    result is empty.
//! 3. Without query text, seed from the first scope facet filter, or else
//!    from every id in the summary hash.
//! 4. Intersect each remaining filter's facet set.
//!
//! Planning only reads; it never writes to the store.

use crate::adapter::IndexAdapter;
use crate::request::FacetFilter;
use crate::schema::{FacetKind, IndexSchema};
use crate::tokenizer::extract_terms;
use dirsearch_core::{Error, Result};
use dirsearch_storage::Store;
use std::collections::HashSet;
use tracing::debug;

/// Output of planning
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    /// Query terms, sorted; empty without query text
    pub terms: Vec<String>,
    /// Qualifying record ids, unordered
    pub candidates: HashSet<String>,
}

impl Plan {
    /// Whether the request had scorable query terms
    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }
}

/// Facet set a filter resolves to
struct ResolvedFilter<'f> {
    facet: &'f str,
    value: Option<&'f str>,
    kind: FacetKind,
}

fn resolve<'f>(schema: &IndexSchema, filter: &'f FacetFilter) -> Result<ResolvedFilter<'f>> {
    filter.validate()?;
    let spec = schema.facet_spec(filter.facet())?;
    match (filter, spec.kind) {
        (FacetFilter::Flag { facet }, FacetKind::Flag) => Ok(ResolvedFilter {
            facet,
            value: None,
            kind: FacetKind::Flag,
        }),
        (FacetFilter::Equals { facet, value }, kind @ (FacetKind::Scope | FacetKind::Value)) => {
            Ok(ResolvedFilter {
                facet,
                value: Some(value.as_str()),
                kind,
            })
        }
        (FacetFilter::Unset { facet }, kind @ (FacetKind::Scope | FacetKind::Value)) => {
            Ok(ResolvedFilter {
                facet,
                value: None,
                kind,
            })
        }
        _ => Err(Error::InvalidKey(format!(
            "filter on '{}' does not match a {:?} facet",
            filter.facet(),
            spec.kind
        ))),
    }
}

/// Intersect sets smallest first, stopping at the first empty result
pub fn intersect_all(mut sets: Vec<HashSet<String>>) -> HashSet<String> {
    if sets.is_empty() {
        return HashSet::new();
    }
    sets.sort_by_key(|s| s.len());
    let mut iter = sets.into_iter();
    let mut result = iter.next().unwrap_or_default();
    for set in iter {
        if result.is_empty() {
            break;
        }
        result.retain(|id| set.contains(id));
    }
    result
}

/// Derive the candidate set for a query and filters
///
/// # Errors
/// `Error::InvalidKey` for a filter naming an unknown facet, a filter whose
/// kind does not match its facet, or a value that cannot name a facet set.
/// Store errors propagate.
pub fn plan<S>(
    adapter: &IndexAdapter<'_, S>,
    schema: &IndexSchema,
    query: Option<&str>,
    filters: &[FacetFilter],
) -> Result<Plan>
where
    S: Store + ?Sized,
{
    let mut resolved = filters
        .iter()
        .map(|f| resolve(schema, f))
        .collect::<Result<Vec<_>>>()?;

    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let (terms, mut candidates) = match query {
        Some(text) => {
            let terms: Vec<String> = extract_terms(&[text]).into_iter().collect();
            if terms.is_empty() {
                debug!(target: "dirsearch::query", query = text, "No searchable terms in query");
                return Ok(Plan::default());
            }

            let mut postings = Vec::with_capacity(terms.len());
            for term in &terms {
                let set = adapter.postings(term)?;
                if set.is_empty() {
                    debug!(target: "dirsearch::query", term = %term, "Term has no postings");
                    postings.clear();
                    break;
                }
                postings.push(set);
            }
            let matched = intersect_all(postings);
            (terms, matched)
        }
        None => {
            let seed = resolved.iter().position(|f| f.kind == FacetKind::Scope);
            let seeded = match seed {
                Some(idx) => {
                    let scope = resolved.remove(idx);
                    adapter.facet_members(scope.facet, scope.value)?
                }
                None => adapter.summary_ids()?,
            };
            (vec![], seeded)
        }
    };

    for filter in &resolved {
        if candidates.is_empty() {
            break;
        }
        let members = adapter.facet_members(filter.facet, filter.value)?;
        candidates.retain(|id| members.contains(id));
    }

    debug!(
        target: "dirsearch::query",
        kind = %schema.kind,
        terms = terms.len(),
        filters = filters.len(),
        candidates = candidates.len(),
        "Planned query"
    );
    Ok(Plan { terms, candidates })
}
