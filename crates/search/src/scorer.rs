//! Scoring and ranking
//!
//! This module provides:
//! - Scorer trait for pluggable scoring algorithms
//! - WeightedTermScorer, the default weighted term-frequency scorer
//! - rank(), which orders hits by a [`SortMode`]
//!
//! Scores are computed from summaries, so scoring never reads beyond the
//! summary hash.

use crate::request::{SearchHit, SortMode};
use crate::schema::{FacetKind, IndexSchema, FLAG_TRUE};
use crate::summary::Summary;
use crate::tokenizer::tokenize;
use dirsearch_core::FieldWeights;
use std::cmp::Ordering;

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable relevance scoring
///
/// Implementations must be deterministic: the same summary and terms
/// always give the same score.
pub trait Scorer: Send + Sync {
    /// Score a summary against query terms; higher is better
    fn score(&self, summary: &Summary, terms: &[String], schema: &IndexSchema) -> f32;

    /// Scorer name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// WeightedTermScorer
// ============================================================================

/// Sum over fields of field weight times query-term occurrences
///
/// Each occurrence of any query term in a field adds that field's weight,
/// so more matches and matches in heavier fields both score higher.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTermScorer {
    weights: FieldWeights,
}

impl WeightedTermScorer {
    /// Create a scorer with per-role weights
    pub fn new(weights: FieldWeights) -> Self {
        WeightedTermScorer { weights }
    }

    /// Weights in use
    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }
}

impl Default for WeightedTermScorer {
    fn default() -> Self {
        Self::new(FieldWeights::default())
    }
}

impl Scorer for WeightedTermScorer {
    fn score(&self, summary: &Summary, terms: &[String], schema: &IndexSchema) -> f32 {
        if terms.is_empty() {
            return 0.0;
        }
        schema
            .fields
            .iter()
            .map(|spec| {
                let occurrences = tokenize(summary.field(spec.name))
                    .iter()
                    .filter(|token| terms.contains(token))
                    .count();
                spec.role.weight(&self.weights) * occurrences as f32
            })
            .sum()
    }

    fn name(&self) -> &str {
        "weighted_term"
    }
}

// ============================================================================
// Ranking
// ============================================================================

fn by_id(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.summary.id.cmp(&b.summary.id)
}

fn by_score(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score.total_cmp(&a.score)
}

fn by_title(a: &SearchHit, b: &SearchHit) -> Ordering {
    a.summary
        .title
        .to_lowercase()
        .cmp(&b.summary.title.to_lowercase())
}

fn is_flagged(hit: &SearchHit, flag: Option<&str>) -> bool {
    flag.and_then(|f| hit.summary.facet(f)) == Some(FLAG_TRUE)
}

/// Order hits in place
///
/// Without scorable terms, `Relevance` falls back to record id order. Every
/// mode breaks remaining ties by record id, so ranking is deterministic.
/// `FeaturedFirst` uses the schema's first flag facet.
pub fn rank(hits: &mut [SearchHit], sort: SortMode, scored: bool, schema: &IndexSchema) {
    let flag = schema
        .facets
        .iter()
        .find(|f| f.kind == FacetKind::Flag)
        .map(|f| f.name);

    match sort {
        SortMode::Relevance if scored => hits.sort_by(|a, b| by_score(a, b).then_with(|| by_id(a, b))),
        SortMode::Relevance => hits.sort_by(by_id),
        SortMode::Newest => hits.sort_by(|a, b| {
            b.summary
                .created_at
                .cmp(&a.summary.created_at)
                .then_with(|| by_id(a, b))
        }),
        SortMode::Oldest => hits.sort_by(|a, b| {
            a.summary
                .created_at
                .cmp(&b.summary.created_at)
                .then_with(|| by_id(a, b))
        }),
        SortMode::TitleAsc => hits.sort_by(|a, b| by_title(a, b).then_with(|| by_id(a, b))),
        SortMode::TitleDesc => hits.sort_by(|a, b| by_title(b, a).then_with(|| by_id(a, b))),
        SortMode::FeaturedFirst => hits.sort_by(|a, b| {
            is_flagged(b, flag)
                .cmp(&is_flagged(a, flag))
                .then_with(|| b.summary.created_at.cmp(&a.summary.created_at))
                .then_with(|| by_id(a, b))
        }),
    }
}
