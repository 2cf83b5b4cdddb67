//! Summary Hash projection
//!
//! A summary is the compact, denormalized view of one record stored in the
//! site's Summary Hash. It serves two purposes:
//! - hydration: search results are built from summaries, never from source records
//! - cleanup: deindexing re-derives facet memberships and terms from it
//!
//! Field texts are stored after their character bound, so the text a scorer
//! sees is exactly the text that was indexed.

use crate::schema::{IndexSchema, Indexable};
use crate::tokenizer::extract_terms;
use chrono::{DateTime, Utc};
use dirsearch_core::{DocKind, Error, RecordId, Result, SiteId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Compact projection of an indexed record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Record identifier
    pub id: RecordId,
    /// Owning site
    pub site_id: SiteId,
    /// Record kind
    pub kind: DocKind,
    /// Display title (listing title or category name)
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Bounded text of every indexed field, by field name
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Projected facet values, by facet name
    #[serde(default)]
    pub facets: BTreeMap<String, String>,
    /// Display-only attributes
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Summary {
    /// Project a record through its schema
    pub fn from_record<R: Indexable>(schema: &IndexSchema, record: &R) -> Self {
        let fields: BTreeMap<String, String> = schema
            .fields
            .iter()
            .map(|spec| {
                let text = record.field_text(spec.name).unwrap_or_default();
                (spec.name.to_string(), spec.bound(text).to_string())
            })
            .collect();

        let facets = schema
            .facets
            .iter()
            .filter_map(|spec| {
                record
                    .facet_value(spec.name)
                    .map(|v| (spec.name.to_string(), v.projected()))
            })
            .collect();

        let title = schema
            .title_field()
            .and_then(|spec| record.field_text(spec.name))
            .unwrap_or_default()
            .to_string();

        Summary {
            id: record.record_id().clone(),
            site_id: record.site_id().clone(),
            kind: schema.kind,
            title,
            slug: record.slug().to_string(),
            fields,
            facets,
            extras: record.extras(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }

    /// Bounded text of a field, empty if absent
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Projected value of a facet
    pub fn facet(&self, name: &str) -> Option<&str> {
        self.facets.get(name).map(String::as_str)
    }

    /// Terms of the projected field texts
    pub fn terms(&self) -> BTreeSet<String> {
        let texts: Vec<&str> = self.fields.values().map(String::as_str).collect();
        extract_terms(&texts)
    }

    /// Encode for the Summary Hash
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a Summary Hash value
    ///
    /// # Errors
    /// `Error::MalformedSummary` when the value is not a valid projection.
    pub fn decode(record_id: &str, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::MalformedSummary {
            record_id: record_id.to_string(),
            reason: e.to_string(),
        })
    }
}
