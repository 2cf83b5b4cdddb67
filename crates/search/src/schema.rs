//! Per-kind index configuration
//!
//! Listings and categories share one maintainer, planner, scorer and
//! paginator. What differs between them is captured here as data:
//! - which text fields are tokenized, their scoring role, and an optional
//!   character bound
//! - which facet sets exist and how a facet value maps to a set key
//!
//! Records expose their fields and facet values through [`Indexable`].

use chrono::{DateTime, Utc};
use dirsearch_core::{DocKind, Error, FieldWeights, RecordId, Result, SiteId};
use std::collections::BTreeMap;

// ============================================================================
// Fields
// ============================================================================

/// Scoring role of a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Title or name, highest weight
    Title,
    /// Short description
    Description,
    /// Long body content, lowest weight
    Content,
}

impl FieldRole {
    /// Weight of one term occurrence in a field of this role
    pub fn weight(&self, weights: &FieldWeights) -> f32 {
        match self {
            FieldRole::Title => weights.title,
            FieldRole::Description => weights.description,
            FieldRole::Content => weights.content,
        }
    }
}

/// A tokenized text field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name, also the summary projection key
    pub name: &'static str,
    /// Scoring role
    pub role: FieldRole,
    /// Only this many leading characters are indexed and projected
    pub max_chars: Option<usize>,
}

impl FieldSpec {
    /// Unbounded field
    pub fn new(name: &'static str, role: FieldRole) -> Self {
        FieldSpec {
            name,
            role,
            max_chars: None,
        }
    }

    /// Builder: bound the indexed prefix
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Apply the character bound to `text`
    pub fn bound<'a>(&self, text: &'a str) -> &'a str {
        match self.max_chars {
            Some(max) => match text.char_indices().nth(max) {
                Some((byte_idx, _)) => &text[..byte_idx],
                None => text,
            },
            None => text,
        }
    }
}

// ============================================================================
// Facets
// ============================================================================

/// How a facet maps onto facet sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    /// One set per value; may seed candidates when a query has no text
    Scope,
    /// Single set holding the records whose flag is true
    Flag,
    /// One set per value
    Value,
}

/// A facet definition
#[derive(Debug, Clone, PartialEq)]
pub struct FacetSpec {
    /// Facet name, also the summary projection key
    pub name: &'static str,
    /// Set mapping
    pub kind: FacetKind,
}

impl FacetSpec {
    /// Create a facet definition
    pub fn new(name: &'static str, kind: FacetKind) -> Self {
        FacetSpec { name, kind }
    }

    /// Set membership implied by a projected facet value
    ///
    /// Returns `None` when the value puts the record in no set (a false flag).
    /// `Some(None)` is the valueless set: the records of a flag facet whose
    /// flag is set, or the records of a value facet that have no value.
    /// `Some(Some(v))` is the set for value `v`.
    pub fn membership<'a>(&self, value: &'a str) -> Option<Option<&'a str>> {
        match self.kind {
            FacetKind::Flag => (value == FLAG_TRUE).then_some(None),
            FacetKind::Scope | FacetKind::Value if value == UNSET => Some(None),
            FacetKind::Scope | FacetKind::Value => Some(Some(value)),
        }
    }
}

/// Projected value of a set flag
pub const FLAG_TRUE: &str = "true";
/// Projected value of a cleared flag
pub const FLAG_FALSE: &str = "false";
/// Projected value of a value facet the record leaves unset
///
/// Empty is never a valid key segment, so it cannot collide with a real value.
pub const UNSET: &str = "";

/// Facet value supplied by a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetValue {
    /// Boolean flag
    Flag(bool),
    /// Discrete value
    Value(String),
    /// No value; the record joins the facet's valueless set
    Unset,
}

impl FacetValue {
    /// String form stored in the summary projection
    pub fn projected(&self) -> String {
        match self {
            FacetValue::Flag(true) => FLAG_TRUE.to_string(),
            FacetValue::Flag(false) => FLAG_FALSE.to_string(),
            FacetValue::Value(v) => v.clone(),
            FacetValue::Unset => UNSET.to_string(),
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Index configuration for one record kind
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSchema {
    /// Key namespace
    pub kind: DocKind,
    /// Tokenized fields, in projection order
    pub fields: Vec<FieldSpec>,
    /// Facet definitions
    pub facets: Vec<FacetSpec>,
}

impl IndexSchema {
    /// Create an empty schema for `kind`
    pub fn new(kind: DocKind) -> Self {
        IndexSchema {
            kind,
            fields: vec![],
            facets: vec![],
        }
    }

    /// Builder: add a text field
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Builder: add a facet
    pub fn facet(mut self, spec: FacetSpec) -> Self {
        self.facets.push(spec);
        self
    }

    /// Look up a facet definition
    pub fn facet_spec(&self, name: &str) -> Result<&FacetSpec> {
        self.facets
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::InvalidKey(format!("unknown {} facet '{}'", self.kind, name)))
    }

    /// The first title-role field, used for display and title sorting
    pub fn title_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.role == FieldRole::Title)
    }

    /// Facet sets a record with these projected facet values belongs to
    pub fn memberships<'a>(
        &'a self,
        facets: &'a BTreeMap<String, String>,
    ) -> Vec<(&'static str, Option<&'a str>)> {
        self.facets
            .iter()
            .filter_map(|spec| {
                let value = facets.get(spec.name)?;
                spec.membership(value).map(|set| (spec.name, set))
            })
            .collect()
    }
}

// ============================================================================
// Indexable
// ============================================================================

/// A record the generic indexer can consume
///
/// Field and facet names are the ones declared in the record kind's
/// [`IndexSchema`]; unknown names return `None`.
pub trait Indexable {
    /// Record identifier
    fn record_id(&self) -> &RecordId;

    /// Owning site
    fn site_id(&self) -> &SiteId;

    /// Text of a declared field
    fn field_text(&self, field: &str) -> Option<&str>;

    /// Value of a declared facet
    fn facet_value(&self, facet: &str) -> Option<FacetValue>;

    /// URL slug
    fn slug(&self) -> &str;

    /// Creation time
    fn created_at(&self) -> DateTime<Utc>;

    /// Last modification time
    fn updated_at(&self) -> DateTime<Utc>;

    /// Display-only attributes carried in the summary
    fn extras(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}
